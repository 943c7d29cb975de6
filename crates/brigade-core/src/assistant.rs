//! Shared assistant wiring: dataset, tool dispatcher, model client and the
//! fixed per-conversation settings.

use crate::error::CoreError;
use crate::model_session::ModelSession;
use crate::prompt;
use crate::session::ConversationSession;
use brigade_config::{AssistantConfig, BrigadeConfig};
use brigade_llm::{
    FunctionDeclaration, GeminiClient, GenerationConfig, ModelClient, ToolSet,
};
use brigade_tools::{RestaurantDataset, ToolDispatcher, builtin_tool_registry};
use log::{info, warn};
use std::sync::Arc;

/// Factory for conversation sessions. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Assistant {
    dataset: Arc<RestaurantDataset>,
    dispatcher: ToolDispatcher,
    client: Option<Arc<dyn ModelClient>>,
    settings: AssistantConfig,
    sampling: GenerationConfig,
    api_key_env: String,
}

impl Assistant {
    /// Wire an assistant around an explicit client. `None` means the
    /// provider is not configured; sessions then answer with a notice.
    pub fn new(
        config: &BrigadeConfig,
        dataset: Arc<RestaurantDataset>,
        client: Option<Arc<dyn ModelClient>>,
    ) -> Result<Self, CoreError> {
        let registry = builtin_tool_registry()?;
        Ok(Self {
            dataset,
            dispatcher: ToolDispatcher::new(registry),
            client,
            settings: config.assistant.clone(),
            sampling: GenerationConfig::sampling(
                config.provider.temperature,
                config.provider.max_output_tokens,
            ),
            api_key_env: config.provider.api_key_env.clone(),
        })
    }

    /// Wire an assistant with the HTTP client, resolving the API key from
    /// config or the environment.
    pub fn from_config(
        config: &BrigadeConfig,
        dataset: Arc<RestaurantDataset>,
    ) -> Result<Self, CoreError> {
        let client = match config.provider.resolve_api_key() {
            Some(key) => {
                info!(
                    "model provider configured (model={})",
                    config.provider.model
                );
                Some(Arc::new(GeminiClient::from_config(&config.provider, key)?)
                    as Arc<dyn ModelClient>)
            }
            None => {
                warn!(
                    "model provider not configured (env={})",
                    config.provider.api_key_env
                );
                None
            }
        };
        Self::new(config, dataset, client)
    }

    /// Start a fresh conversation seeded with the greeting.
    pub fn session(&self) -> ConversationSession {
        ConversationSession::new(self.clone())
    }

    pub fn dataset(&self) -> &RestaurantDataset {
        &self.dataset
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    pub fn settings(&self) -> &AssistantConfig {
        &self.settings
    }

    pub fn client(&self) -> Option<&Arc<dyn ModelClient>> {
        self.client.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Text returned instead of calling the provider when no key is set.
    pub fn not_configured_text(&self) -> String {
        format!(
            "The assistant isn't configured yet. Set the {} environment variable \
             (or provider.api_key in brigade.json5) and try again.",
            self.api_key_env
        )
    }

    /// The fixed system instruction for new conversations.
    pub fn system_instruction(&self) -> String {
        prompt::system_instruction(
            &self.dataset,
            &self.settings,
            &self.dispatcher.registry().specs(),
        )
    }

    /// Function declarations plus the enabled provider capabilities.
    pub fn tool_sets(&self) -> Vec<ToolSet> {
        let declarations = self
            .dispatcher
            .registry()
            .specs()
            .into_iter()
            .map(|spec| FunctionDeclaration {
                name: spec.name.as_str().to_string(),
                description: spec.description,
                parameters: spec.args_schema,
            })
            .collect();
        let mut sets = vec![ToolSet::functions(declarations)];
        if self.settings.code_execution {
            sets.push(ToolSet::code_execution());
        }
        if self.settings.web_search {
            sets.push(ToolSet::google_search());
        }
        sets
    }

    /// Open a new live handle bound to the fixed instruction and settings.
    pub(crate) fn open_model_session(&self, client: Arc<dyn ModelClient>) -> ModelSession {
        ModelSession::new(
            client,
            self.system_instruction(),
            self.tool_sets(),
            self.sampling.clone(),
        )
    }
}
