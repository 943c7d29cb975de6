//! `brigade.json5` settings: provider credentials and sampling, assistant
//! behaviour, the optional advisor relay, and insight generation.
//!
//! Files are merged user, then working directory, then explicit overrides.

mod error;
mod loader;
mod model;

pub use error::ConfigError;
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
pub use model::*;
