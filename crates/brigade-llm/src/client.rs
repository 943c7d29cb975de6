//! Model client trait and the HTTP implementation.

use crate::error::LlmError;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use brigade_config::ProviderConfig;
use log::{debug, error, warn};
use std::fmt;
use std::time::Duration;

/// Seam between the orchestrator and a generative model provider.
#[async_trait]
pub trait ModelClient: Send + Sync + fmt::Debug {
    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Run one `generateContent` exchange.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError>;
}

/// REST client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    /// Build a client with an explicit endpoint and request timeout.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LlmError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from provider settings and a resolved key.
    pub fn from_config(config: &ProviderConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(
            api_key,
            config.model.clone(),
            &config.base_url,
            config.request_timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        debug!(
            "sending generateContent (model={}, contents={}, tools={})",
            self.model,
            request.contents.len(),
            request.tools.len()
        );
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            error!(
                "generateContent failed (model={}, status={})",
                self.model,
                status.as_u16()
            );
            return Err(LlmError::from_status(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|err| LlmError::Malformed(err.to_string()))?;
        if parsed.candidates.is_empty() {
            let reason = parsed
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            warn!(
                "generateContent returned no candidates (model={}, reason={})",
                self.model, reason
            );
            return Err(LlmError::Empty(reason));
        }
        debug!(
            "generateContent ok (model={}, parts={})",
            self.model,
            parsed.parts().len()
        );
        Ok(parsed)
    }
}

fn transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Transport(err.to_string())
    }
}
