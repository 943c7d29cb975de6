//! Error types for model provider calls.

use serde_json::Value;
use thiserror::Error;

/// Longest provider body excerpt kept in an error message.
const MAX_BODY_EXCERPT: usize = 300;

/// Errors returned by a [`crate::ModelClient`].
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider could not be reached.
    #[error("could not reach the model provider: {0}")]
    Transport(String),
    /// The request exceeded its deadline.
    #[error("the model provider did not answer in time")]
    Timeout,
    /// The credential was rejected.
    #[error("the model provider rejected the API key (status {status}): {message}")]
    Auth { status: u16, message: String },
    /// Too many requests.
    #[error("the model provider is rate limiting requests: {0}")]
    RateLimited(String),
    /// Any other non-success status.
    #[error("model provider error (status {status}): {message}")]
    Http { status: u16, message: String },
    /// The body was not a valid response document.
    #[error("malformed response from model provider: {0}")]
    Malformed(String),
    /// The provider returned no candidates.
    #[error("the model returned no answer: {0}")]
    Empty(String),
}

impl LlmError {
    /// Classify a non-success HTTP status, surfacing the provider's
    /// `error.message` when the body carries one.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = provider_message(body);
        match status {
            401 | 403 => LlmError::Auth { status, message },
            429 => LlmError::RateLimited(message),
            _ => LlmError::Http { status, message },
        }
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Transport(_) | LlmError::Timeout | LlmError::RateLimited(_) => true,
            LlmError::Http { status, .. } => *status >= 500,
            LlmError::Auth { .. } | LlmError::Malformed(_) | LlmError::Empty(_) => false,
        }
    }
}

fn provider_message(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|value| value.pointer("/error/message"))
        .and_then(Value::as_str);
    match message {
        Some(message) => message.to_string(),
        None => body.trim().chars().take(MAX_BODY_EXCERPT).collect(),
    }
}
