//! Configuration schema for brigade.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root config for the brigade assistant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrigadeConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
}

impl BrigadeConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> BrigadeConfigBuilder {
        BrigadeConfigBuilder::new()
    }
}

/// Builder for assembling a `BrigadeConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct BrigadeConfigBuilder {
    config: BrigadeConfig,
}

impl BrigadeConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: BrigadeConfig::default(),
        }
    }

    /// Replace the model provider configuration.
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.config.provider = provider;
        self
    }

    /// Replace the conversational assistant configuration.
    pub fn assistant(mut self, assistant: AssistantConfig) -> Self {
        self.config.assistant = assistant;
        self
    }

    /// Replace the backend relay configuration.
    pub fn relay(mut self, relay: RelayConfig) -> Self {
        self.config.relay = relay;
        self
    }

    /// Replace the structured insight configuration.
    pub fn insights(mut self, insights: InsightsConfig) -> Self {
        self.config.insights = insights;
        self
    }

    /// Finalize and return the built `BrigadeConfig`.
    pub fn build(self) -> BrigadeConfig {
        self.config
    }
}

/// Generative model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Inline API key. Prefer `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_chat_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key from config or the process environment.
    ///
    /// Returns `None` when no non-blank key is available; callers treat that
    /// as "not configured" rather than an error.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using a custom environment lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let inline = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty());
        if let Some(key) = inline {
            return Some(key.to_string());
        }
        lookup(&self.api_key_env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Conversational assistant behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Override for the restaurant name shown in the system instruction.
    #[serde(default)]
    pub restaurant_name: Option<String>,
    /// Maximum provider round-trips per user turn, the opening request included.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
    /// First assistant message of every fresh transcript.
    #[serde(default = "default_seed_greeting")]
    pub seed_greeting: String,
    /// Enable provider-run code execution.
    #[serde(default = "default_true")]
    pub code_execution: bool,
    /// Enable web search grounding.
    #[serde(default = "default_true")]
    pub web_search: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            restaurant_name: None,
            max_tool_rounds: default_max_tool_rounds(),
            seed_greeting: default_seed_greeting(),
            code_execution: true,
            web_search: true,
        }
    }
}

/// Backend advisor relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Relay origin, e.g. `http://localhost:8000`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// How long the relay stays suspended after a failed call.
    #[serde(default = "default_reprobe_after_secs")]
    pub reprobe_after_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            health_path: default_health_path(),
            chat_path: default_chat_path(),
            probe_timeout_secs: default_probe_timeout_secs(),
            reprobe_after_secs: default_reprobe_after_secs(),
        }
    }
}

impl RelayConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn reprobe_after(&self) -> Duration {
        Duration::from_secs(self.reprobe_after_secs)
    }
}

/// Structured insight generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    #[serde(default = "default_insight_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            temperature: default_insight_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_chat_temperature() -> f32 {
    0.7
}

fn default_insight_temperature() -> f32 {
    0.4
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_tool_rounds() -> usize {
    5
}

fn default_seed_greeting() -> String {
    "Hi! I'm your kitchen assistant. Ask me about stock levels, menu performance, \
     suppliers, or snap a photo of an invoice or shelf and I'll take a look."
        .to_string()
}

fn default_true() -> bool {
    true
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_chat_path() -> String {
    "/api/advisor/chat".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_reprobe_after_secs() -> u64 {
    60
}
