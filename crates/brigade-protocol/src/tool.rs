//! Tool call envelopes exchanged between the model and the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A function call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Outcome of a dispatched tool call. Always well-formed data: failures are
/// carried as `{"error": "..."}` in `result` and flagged in `failed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallResult {
    /// Name of the tool that was requested.
    pub name: String,
    /// Structured payload or error object.
    pub result: Value,
    /// Set only by [`ToolCallResult::error`].
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl ToolCallResult {
    /// Successful result.
    pub fn ok(name: impl Into<String>, result: Value) -> Self {
        Self {
            name: name.into(),
            result,
            failed: false,
        }
    }

    /// Error payload the model can narrate back to the user.
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: json!({ "error": message.into() }),
            failed: true,
        }
    }

    /// Whether the call failed.
    pub fn is_error(&self) -> bool {
        self.failed
    }

    /// Error message, if the call failed.
    pub fn error_message(&self) -> Option<&str> {
        if !self.failed {
            return None;
        }
        self.result.get("error").and_then(Value::as_str)
    }
}

/// Errors raised by tool implementations before they are folded into a
/// [`ToolCallResult`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ToolError {
    /// Tool name was not found in the registry.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    /// Tool received invalid or missing arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// The lookup matched nothing in the dataset.
    #[error("{0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_result_carries_message() {
        let result = ToolCallResult::error("check_inventory", "no ingredient matching 'saffron'");
        assert!(result.is_error());
        assert_eq!(
            result.error_message(),
            Some("no ingredient matching 'saffron'")
        );
        assert_eq!(result.result, json!({"error": "no ingredient matching 'saffron'"}));
    }

    #[test]
    fn unknown_function_message_matches_contract() {
        let err = ToolError::UnknownFunction("bake_cake".to_string());
        assert_eq!(err.to_string(), "unknown function: bake_cake");
    }

    #[test]
    fn ok_result_is_not_error() {
        let result = ToolCallResult::ok("get_daily_stats", json!({"total_orders_today": 3}));
        assert!(!result.is_error());
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn success_payload_with_error_field_is_not_error() {
        let result = ToolCallResult::ok(
            "get_menu_items",
            json!({"error": "not an error, just a column name", "items": []}),
        );
        assert!(!result.is_error());
        assert_eq!(result.error_message(), None);
    }
}
