//! Layered configuration loader.
//!
//! Discovers configuration layers (user, cwd, runtime overrides), validates
//! each against the schema, merges them and produces a final `BrigadeConfig`.

mod layer_io;
mod merge;
mod schema;


use crate::{BrigadeConfig, ConfigError};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config dir.
const DEFAULT_CONFIG_FILE: &str = "brigade.json5";
/// Directory under `$HOME` holding the user layer.
const DEFAULT_CONFIG_DIR: &str = ".brigade";

/// Merged config and the files it came from.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: BrigadeConfig,
    /// Layers that contributed to the config, low to high precedence.
    pub layers: Vec<ConfigLayer>,
}

/// Where a layer was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// `~/.brigade/brigade.json5`
    User,
    /// `./brigade.json5`
    Cwd,
    /// Files passed explicitly, e.g. `--config`. Highest precedence.
    Runtime,
}

impl ConfigLayerSource {
    fn label(self) -> &'static str {
        match self {
            ConfigLayerSource::User => "user",
            ConfigLayerSource::Cwd => "cwd",
            ConfigLayerSource::Runtime => "runtime",
        }
    }
}

/// One file that contributed to the merged config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Where to look for each layer.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Directory searched for `brigade.json5`.
    pub cwd: PathBuf,
    /// Optional user config path (defaults to `~/.brigade/brigade.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last, in order.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Default user location plus `cwd/brigade.json5`.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    /// Replace the user config location.
    pub fn with_user_path(mut self, path: Option<PathBuf>) -> Self {
        self.user_config_path = path;
        self
    }

    /// Append an explicit file. It must exist.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl BrigadeConfig {
    /// Read one file without layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config file (path={})", path.display());
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::read(path, err))?;
        let value: Value = json5::from_str(&contents)?;
        config_from_value(value, &format!("config({})", path.display()))
    }

    /// Parse one JSON5 document without layering.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("parsing inline config (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Merge the user and working-directory layers for `cwd`.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading brigade config layers (cwd={})",
            cwd.as_ref().display()
        );
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations.
    ///
    /// Layer precedence (low -> high): user, cwd, runtime overrides. Missing
    /// user and cwd files are skipped; runtime paths must exist. A file
    /// reached through two layers is only merged once.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let mut candidates = Vec::new();
        if let Some(path) = options.user_config_path {
            candidates.push((ConfigLayerSource::User, path, false));
        }
        candidates.push((
            ConfigLayerSource::Cwd,
            options.cwd.join(DEFAULT_CONFIG_FILE),
            false,
        ));
        for path in options.runtime_paths {
            candidates.push((ConfigLayerSource::Runtime, path, true));
        }

        let mut seen = HashSet::new();
        let mut layers = Vec::new();
        let mut merged = Value::Object(Default::default());
        for (source, path, required) in candidates {
            if !required && !path.exists() {
                debug!(
                    "config layer absent (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            if !seen.insert(layer_io::unique_path(&path)) {
                debug!(
                    "config layer already merged (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            let value = layer_io::read_layer(source, &path)?;
            merge::merge_json_values(&mut merged, &value);
            layers.push(ConfigLayer { source, path });
        }

        let config = config_from_value(merged, "effective")?;
        info!("brigade config ready (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assistant.max_tool_rounds == 0 {
            return Err(ConfigError::Invalid(
                "assistant.max_tool_rounds must be at least 1".to_string(),
            ));
        }
        for (path, temperature) in [
            ("provider.temperature", self.provider.temperature),
            ("insights.temperature", self.insights.temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::Invalid(format!(
                    "{path} must be between 0.0 and 2.0"
                )));
            }
        }
        if self.provider.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "provider.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.relay.enabled && self.relay.base_url.is_none() {
            return Err(ConfigError::Invalid(
                "relay.enabled requires relay.base_url".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_from_value(value: Value, label: &str) -> Result<BrigadeConfig, ConfigError> {
    schema::validate_layer(&value, label)?;
    let config: BrigadeConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
