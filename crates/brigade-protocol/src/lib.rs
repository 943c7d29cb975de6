//! Shared data model for the brigade assistant: transcript messages,
//! tool call envelopes, and the tool error type.

mod message;
mod tool;

pub use message::{CodeExecutionRecord, GroundingSource, ImageRef, Message, Role};
pub use tool::{ToolCallRequest, ToolCallResult, ToolError};

use uuid::Uuid;

/// Unique identifier for a conversation session.
pub type SessionId = Uuid;
/// Unique identifier for a transcript message.
pub type MessageId = Uuid;
