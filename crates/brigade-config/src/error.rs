//! Errors raised while reading, merging and checking `brigade.json5` layers.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layer file exists in the stack but could not be read.
    #[error("cannot read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid JSON5: {0}")]
    ParseFailed(#[from] json5::Error),
    #[error("config does not match the expected shape: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// Unknown key or wrongly typed value. `path` is `<layer>:<dotted.key>`.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// A value is well typed but out of range, or contradicts another.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}
