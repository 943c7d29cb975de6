//! Registry construction errors.

use crate::ToolName;
use thiserror::Error;

/// Raised when a tool set does not cover the catalogue exactly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no implementation registered for tool {0}")]
    MissingTool(ToolName),
    #[error("tool {0} registered more than once")]
    DuplicateTool(ToolName),
}
