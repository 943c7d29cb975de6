//! Transcript message records.

use crate::MessageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Speaker role for a transcript message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed (or photographed) by the operator.
    User,
    /// Message produced by the assistant.
    Assistant,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Reference to an image attached to a user message.
///
/// Only metadata is kept in the transcript; the encoded bytes travel with
/// the outgoing request and are not retained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    pub name: String,
    pub mime_type: String,
}

/// Code the model ran in its sandbox, plus whatever output came back.
///
/// Either field may be empty when the model only sent one half.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeExecutionRecord {
    pub code: String,
    pub output: String,
}

/// Web citation attached to a grounded answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Immutable transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message identifier.
    pub id: MessageId,
    /// Role that produced the message.
    pub role: Role,
    /// Display text.
    pub text: String,
    /// Attached image, user messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    /// Provenance badges: tool names in first-seen order, each at most once.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools_used: Vec<String>,
    /// Every tool invocation of the turn in order, repeats included.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_invocations: Vec<String>,
    /// Code execution performed by the model while answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_execution: Option<CodeExecutionRecord>,
    /// Web sources cited by the answer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<GroundingSource>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a plain user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into())
    }

    /// Create a plain assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into())
    }

    /// Attach image metadata.
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    fn new(role: Role, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            image: None,
            tools_used: Vec::new(),
            tool_invocations: Vec::new(),
            code_execution: None,
            sources: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn plain_message_omits_empty_provenance() {
        let message = Message::assistant("hello");
        let value = serde_json::to_value(&message).expect("serialize");
        assert_eq!(value["role"], json!("assistant"));
        assert_eq!(value["text"], json!("hello"));
        assert!(value.get("tools_used").is_none());
        assert!(value.get("code_execution").is_none());
        assert!(value.get("sources").is_none());
    }

    #[test]
    fn message_with_image_deserializes_without_optional_fields() {
        let message = Message::user("what is this?").with_image(ImageRef {
            name: "shelf.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
        });
        let raw = serde_json::to_string(&message).expect("serialize");
        let decoded: Message = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(decoded, message);
        assert_eq!(decoded.role.as_str(), "user");
    }
}
