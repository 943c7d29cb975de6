use brigade_config::InsightsConfig;
use brigade_core::insights::{InsightType, Level, MenuAction};
use brigade_core::{
    InsightCache, InsightError, InsightGenerator, InsightKind, InsightPayload, InsightState,
};
use brigade_llm::{LlmError, ModelClient};
use brigade_test_utils::{ScriptedModel, sample_dataset, text_response};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

fn generator(model: &ScriptedModel, cache: InsightCache) -> InsightGenerator {
    let client: Arc<dyn ModelClient> = Arc::new(model.clone());
    InsightGenerator::new(Some(client), InsightsConfig::default(), cache)
}

fn dashboard_json(count: usize) -> Value {
    let items = (0..count)
        .map(|index| {
            json!({
                "title": format!("Insight {index}"),
                "description": "Mozzarella will run out before the next delivery.",
                "severity": "high",
                "type": "risk"
            })
        })
        .collect::<Vec<_>>();
    json!({ "insights": items })
}

fn menu_json() -> Value {
    json!({"suggestions": [
        {"dish_name": "Margherita Pizza", "action": "promote", "reason": "Top seller", "detail": "Feature it at lunch"},
        {"dish_name": "Panna Cotta", "action": "discontinue", "reason": "4 orders today", "detail": "Replace with a seasonal dessert"},
        {"dish_name": "Risotto ai Funghi", "action": "reprice", "reason": "Rising demand", "detail": "Raise to 20.50"}
    ]})
}

#[tokio::test]
async fn generates_and_caches_dashboard_insights() {
    let model = ScriptedModel::new().respond(text_response(&dashboard_json(3).to_string()));
    let generator = generator(&model, InsightCache::new());
    let dataset = sample_dataset();

    let first = generator
        .generate(InsightKind::Dashboard, &dataset)
        .await
        .expect("insights");
    let second = generator
        .generate(InsightKind::Dashboard, &dataset)
        .await
        .expect("cached insights");

    assert_eq!(first, second);
    assert_eq!(model.call_count(), 1);
    match first {
        InsightPayload::Dashboard(dashboard) => {
            assert_eq!(dashboard.insights[0].severity, Level::High);
            assert_eq!(dashboard.insights[0].kind, InsightType::Risk);
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[tokio::test]
async fn request_is_schema_constrained_without_tools() {
    let model = ScriptedModel::new().respond(text_response(&menu_json().to_string()));
    let generator = generator(&model, InsightCache::new());
    generator
        .generate(InsightKind::Menu, &sample_dataset())
        .await
        .expect("suggestions");

    let request = model.requests()[0].clone();
    assert!(request.tools.is_empty());
    assert!(request.system_instruction.is_none());
    let config = request.generation_config.expect("generation config");
    assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
    let schema = config.response_schema.expect("schema");
    assert_eq!(schema["properties"]["suggestions"]["maxItems"], json!(3));
    assert_eq!(config.temperature, Some(InsightsConfig::default().temperature));

    let prompt = request.contents[0].parts[0].text.clone().expect("prompt");
    assert!(prompt.contains("Trattoria Brigata"));
}

#[tokio::test]
async fn cache_is_shared_between_generators() {
    let model = ScriptedModel::new().respond(text_response(&menu_json().to_string()));
    let cache = InsightCache::new();
    let dataset = sample_dataset();
    generator(&model, cache.clone())
        .generate(InsightKind::Menu, &dataset)
        .await
        .expect("suggestions");

    let other = generator(&model, cache.clone());
    match other.cached(InsightKind::Menu, &dataset) {
        InsightState::Ready(InsightPayload::Menu(menu)) => {
            assert_eq!(menu.suggestions[1].action, MenuAction::Discontinue);
        }
        other => panic!("unexpected state: {other:?}"),
    }
    assert_eq!(other.cached(InsightKind::Dashboard, &dataset), InsightState::NotLoaded);
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn refresh_bypasses_cache() {
    let model = ScriptedModel::new()
        .respond(text_response(&dashboard_json(3).to_string()))
        .respond(text_response(&dashboard_json(3).to_string()));
    let generator = generator(&model, InsightCache::new());
    let dataset = sample_dataset();

    generator
        .generate(InsightKind::Dashboard, &dataset)
        .await
        .expect("insights");
    generator
        .refresh(InsightKind::Dashboard, &dataset)
        .await
        .expect("refreshed");

    assert_eq!(model.call_count(), 2);
    assert_eq!(generator.cache().len(), 1);
}

#[tokio::test]
async fn wrong_record_count_fails_and_is_not_cached() {
    let model = ScriptedModel::new()
        .respond(text_response(&dashboard_json(2).to_string()))
        .respond(text_response(&dashboard_json(3).to_string()));
    let generator = generator(&model, InsightCache::new());
    let dataset = sample_dataset();

    let err = generator
        .generate(InsightKind::Dashboard, &dataset)
        .await
        .unwrap_err();
    assert!(matches!(err, InsightError::Schema { kind: "dashboard", .. }));
    assert!(generator.cache().is_empty());

    generator
        .generate(InsightKind::Dashboard, &dataset)
        .await
        .expect("second attempt");
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn non_json_reply_is_invalid() {
    let model = ScriptedModel::new().respond(text_response("Here are three ideas: ..."));
    let generator = generator(&model, InsightCache::new());
    let state = generator
        .load(InsightKind::Procurement, &sample_dataset())
        .await;

    match state {
        InsightState::Failed(message) => assert!(message.contains("not valid JSON")),
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn fenced_json_is_accepted() {
    let body = format!("```json\n{}\n```", menu_json());
    let model = ScriptedModel::new().respond(text_response(&body));
    let generator = generator(&model, InsightCache::new());
    let state = generator.load(InsightKind::Menu, &sample_dataset()).await;
    assert!(matches!(state, InsightState::Ready(InsightPayload::Menu(_))));
}

#[tokio::test]
async fn provider_error_is_reported() {
    let model = ScriptedModel::new().fail(LlmError::RateLimited("quota".to_string()));
    let generator = generator(&model, InsightCache::new());
    let err = generator
        .generate(InsightKind::Procurement, &sample_dataset())
        .await
        .unwrap_err();
    assert!(matches!(err, InsightError::Llm(LlmError::RateLimited(_))));
}

#[tokio::test]
async fn unconfigured_generator_fails_without_network() {
    let generator = InsightGenerator::new(None, InsightsConfig::default(), InsightCache::new());
    let err = generator
        .generate(InsightKind::Dashboard, &sample_dataset())
        .await
        .unwrap_err();
    assert!(matches!(err, InsightError::NotConfigured));
    assert!(!generator.is_configured());
}

#[test]
fn kinds_parse_from_names() {
    assert_eq!("Menu".parse::<InsightKind>().ok(), Some(InsightKind::Menu));
    assert!("weather".parse::<InsightKind>().is_err());
    assert_eq!(InsightKind::Procurement.to_string(), "procurement");
}
