//! Live multi-turn handle to the model provider.

use brigade_llm::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, LlmError,
    ModelClient, ToolSet,
};
use log::debug;
use std::sync::Arc;

/// Owned chat handle: the fixed system instruction, tools and generation
/// settings, plus the provider-side history of this conversation.
///
/// A handle belongs to exactly one conversation session. It is dropped on
/// reset and after any failed exchange, never reused.
#[derive(Debug)]
pub struct ModelSession {
    client: Arc<dyn ModelClient>,
    system_instruction: Content,
    tools: Vec<ToolSet>,
    generation_config: GenerationConfig,
    history: Vec<Content>,
}

impl ModelSession {
    pub fn new(
        client: Arc<dyn ModelClient>,
        system_instruction: impl Into<String>,
        tools: Vec<ToolSet>,
        generation_config: GenerationConfig,
    ) -> Self {
        Self {
            client,
            system_instruction: Content::instruction(system_instruction),
            tools,
            generation_config,
            history: Vec::new(),
        }
    }

    /// Send one user-side content (a message or a batch of function
    /// results) and record the model's reply in the history.
    ///
    /// On failure the outgoing content is removed again so the history
    /// never ends with an unanswered turn.
    pub async fn send(&mut self, content: Content) -> Result<GenerateContentResponse, LlmError> {
        self.history.push(content);
        let request = GenerateContentRequest {
            contents: self.history.clone(),
            system_instruction: Some(self.system_instruction.clone()),
            tools: self.tools.clone(),
            generation_config: Some(self.generation_config.clone()),
        };
        debug!(
            "sending model turn (model={}, history_len={})",
            self.client.model(),
            self.history.len()
        );
        match self.client.generate_content(&request).await {
            Ok(response) => {
                if let Some(content) = response.candidate().and_then(|c| c.content.as_ref()) {
                    self.history.push(Content::model(content.parts.clone()));
                }
                Ok(response)
            }
            Err(err) => {
                self.history.pop();
                Err(err)
            }
        }
    }

    /// Append a user-side content to the history without sending it. The
    /// next `send` carries it along.
    pub fn record(&mut self, content: Content) {
        self.history.push(content);
    }

    /// Provider-side history, oldest first.
    pub fn history(&self) -> &[Content] {
        &self.history
    }
}
