//! One-shot structured insight requests.

use super::InsightKind;
use super::cache::InsightCache;
use super::records::{InsightPayload, response_schema};
use crate::error::InsightError;
use crate::prompt::context_summary;
use brigade_config::{BrigadeConfig, InsightsConfig};
use brigade_llm::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, ModelClient, Part,
};
use brigade_tools::RestaurantDataset;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;

/// What a dashboard widget should render for one insight kind.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightState {
    /// Nothing requested yet.
    NotLoaded,
    Ready(InsightPayload),
    /// Generation failed; the widget shows this message.
    Failed(String),
}

/// Produces and caches the three fixed insight kinds.
#[derive(Debug, Clone)]
pub struct InsightGenerator {
    client: Option<Arc<dyn ModelClient>>,
    cache: InsightCache,
    settings: InsightsConfig,
}

impl InsightGenerator {
    pub fn new(
        client: Option<Arc<dyn ModelClient>>,
        settings: InsightsConfig,
        cache: InsightCache,
    ) -> Self {
        Self {
            client,
            cache,
            settings,
        }
    }

    /// Build with the HTTP client when an API key resolves.
    pub fn from_config(config: &BrigadeConfig, cache: InsightCache) -> Result<Self, InsightError> {
        let client = match config.provider.resolve_api_key() {
            Some(key) => Some(
                Arc::new(GeminiClient::from_config(&config.provider, key)?) as Arc<dyn ModelClient>
            ),
            None => None,
        };
        Ok(Self::new(client, config.insights.clone(), cache))
    }

    pub fn cache(&self) -> &InsightCache {
        &self.cache
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Return the cached payload or ask the provider for a new one.
    pub async fn generate(
        &self,
        kind: InsightKind,
        dataset: &RestaurantDataset,
    ) -> Result<InsightPayload, InsightError> {
        let context = dataset.context_key();
        if let Some(payload) = self.cache.get(kind, &context) {
            debug!("insight cache hit (kind={}, context={})", kind, context);
            return Ok(payload);
        }
        let Some(client) = &self.client else {
            return Err(InsightError::NotConfigured);
        };

        let request = self.request(kind, dataset);
        info!(
            "requesting insight (kind={}, context={}, model={})",
            kind,
            context,
            client.model()
        );
        let response = client.generate_content(&request).await?;
        let raw = response.text();
        let value: Value = serde_json::from_str(strip_fence(&raw))
            .map_err(|err| InsightError::InvalidJson(err.to_string()))?;
        let payload = InsightPayload::parse(kind, &value)?;
        self.cache.insert(kind, context, payload.clone());
        Ok(payload)
    }

    /// Drop the cached entry and generate again.
    pub async fn refresh(
        &self,
        kind: InsightKind,
        dataset: &RestaurantDataset,
    ) -> Result<InsightPayload, InsightError> {
        self.cache.invalidate(kind, &dataset.context_key());
        self.generate(kind, dataset).await
    }

    /// Like [`generate`](Self::generate) but folded into widget state.
    pub async fn load(&self, kind: InsightKind, dataset: &RestaurantDataset) -> InsightState {
        match self.generate(kind, dataset).await {
            Ok(payload) => InsightState::Ready(payload),
            Err(err) => {
                warn!("insight generation failed (kind={}, err={})", kind, err);
                InsightState::Failed(err.to_string())
            }
        }
    }

    /// Current state without touching the provider.
    pub fn cached(&self, kind: InsightKind, dataset: &RestaurantDataset) -> InsightState {
        match self.cache.get(kind, &dataset.context_key()) {
            Some(payload) => InsightState::Ready(payload),
            None => InsightState::NotLoaded,
        }
    }

    fn request(&self, kind: InsightKind, dataset: &RestaurantDataset) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt(kind, dataset))])],
            system_instruction: None,
            tools: Vec::new(),
            generation_config: Some(
                GenerationConfig::sampling(self.settings.temperature, self.settings.max_output_tokens)
                    .with_json_schema(response_schema(kind)),
            ),
        }
    }
}

fn prompt(kind: InsightKind, dataset: &RestaurantDataset) -> String {
    let question = match kind {
        InsightKind::Dashboard => {
            "Give exactly 3 short operational insights for today's dashboard. Mix risks \
             (stock-outs, supplier issues) with opportunities (trending dishes). Each needs a \
             title, a one or two sentence description, a severity (low, medium, high) and a \
             type (risk, opportunity, info)."
        }
        InsightKind::Menu => {
            "Suggest exactly 3 menu changes based on popularity, trend and ingredient risk. \
             Each names an existing dish, an action (reprice, promote, discontinue), the reason \
             and a concrete detail such as a new price or placement."
        }
        InsightKind::Procurement => {
            "Recommend exactly 3 purchasing actions for the next week using supplier prices, \
             lead times and reliability. Each needs an action, details, a savings estimate as \
             text (for example \"$40/week\") and a priority (low, medium, high)."
        }
    };
    format!(
        "You are a restaurant operations analyst.\n\n{}\n{}\nRespond with JSON only.",
        context_summary(dataset),
        question
    )
}

/// Tolerate a markdown code fence around the JSON body.
fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}
