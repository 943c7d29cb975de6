//! Public SDK surface for brigade.
//!
//! This crate re-exports the building blocks of the restaurant assistant and
//! provides small helpers that keep binaries and embedders consistent.

use anyhow::Context;
use std::path::Path;

pub use brigade_config as config;
/// Sessions, relay routing and insights.
pub use brigade_core as core;
pub use brigade_llm as llm;
pub use brigade_protocol as protocol;
/// Dataset model and the domain tools.
pub use brigade_tools as tools;

/// Install `env_logger` (millisecond timestamps, `RUST_LOG` filters) when
/// the `logging` feature is on. Libraries in this workspace only emit
/// through `log`; installing a logger is left to binaries.
#[inline]
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::builder()
            .format_timestamp_millis()
            .parse_default_env()
            .try_init();
    }
}

/// Load the layered config for `cwd`, with `explicit` as the highest
/// precedence layer when given.
pub fn load_config(
    cwd: &Path,
    explicit: Option<&Path>,
) -> anyhow::Result<config::BrigadeConfig> {
    let mut options = config::LayeredConfigOptions::new(cwd);
    if let Some(path) = explicit {
        options = options.with_runtime_path(path);
    }
    let layered = config::BrigadeConfig::load_layered_with_options(options)
        .context("failed to load config")?;
    log::debug!("layered config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}
