//! Error types for the core crate.

use brigade_llm::LlmError;
use brigade_tools::RegistryError;
use thiserror::Error;

/// Errors returned by session and assistant operations.
///
/// Provider failures during a turn are not surfaced here; the session turns
/// them into an apologetic assistant message instead.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Neither text nor an image was supplied.
    #[error("message is empty: type a question or attach a photo")]
    EmptyInput,
    /// The tool set does not match the catalogue.
    #[error("tool registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Building the model client failed.
    #[error("model client error: {0}")]
    Llm(#[from] LlmError),
    /// The attachment could not be used.
    #[error("attachment error: {0}")]
    Attachment(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the structured insight generator.
#[derive(Debug, Error)]
pub enum InsightError {
    /// No provider credential is available.
    #[error("insights are unavailable: the model provider is not configured")]
    NotConfigured,
    /// The provider call failed.
    #[error("insight generation failed: {0}")]
    Llm(#[from] LlmError),
    /// The provider answered with text that is not JSON.
    #[error("insight response is not valid JSON: {0}")]
    InvalidJson(String),
    /// The requested kind is not one of the three fixed questions.
    #[error("unknown insight kind '{0}' (expected dashboard, menu or procurement)")]
    UnknownKind(String),
    /// The JSON does not match the fixed shape for its kind.
    #[error("insight response does not match the {kind} schema: {message}")]
    Schema { kind: &'static str, message: String },
}
