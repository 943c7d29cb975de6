use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode, Uri};
use brigade_llm::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, LlmError, ModelClient, Part,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
struct SeenRequest {
    path: String,
    api_key: Option<String>,
    body: Value,
}

async fn spawn_provider(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<SeenRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let app = Router::new().fallback(
        move |uri: Uri, headers: HeaderMap, Json(body): Json<Value>| {
            let recorder = recorder.clone();
            let reply = reply.clone();
            async move {
                recorder.lock().push(SeenRequest {
                    path: uri.path().to_string(),
                    api_key: headers
                        .get("x-goog-api-key")
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string),
                    body,
                });
                (status, Json(reply))
            }
        },
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}"), seen)
}

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new("test-key", "gemini-test", base_url, Duration::from_secs(5)).expect("client")
}

fn request() -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![Part::text("how much flour?")])],
        system_instruction: Some(Content::instruction("You are a kitchen assistant.")),
        tools: Vec::new(),
        generation_config: Some(GenerationConfig::sampling(0.7, 256)),
    }
}

#[tokio::test]
async fn posts_request_with_key_header_and_parses_reply() {
    let (base_url, seen) = spawn_provider(
        StatusCode::OK,
        json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "12 kg left."}]}}]
        }),
    )
    .await;

    let response = client(&base_url)
        .generate_content(&request())
        .await
        .expect("response");
    assert_eq!(response.text(), "12 kg left.");

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/models/gemini-test:generateContent");
    assert_eq!(seen[0].api_key.as_deref(), Some("test-key"));
    assert_eq!(
        seen[0].body["systemInstruction"]["parts"][0]["text"],
        json!("You are a kitchen assistant.")
    );
    assert_eq!(seen[0].body["generationConfig"]["maxOutputTokens"], json!(256));
}

#[tokio::test]
async fn auth_failures_surface_provider_message() {
    let (base_url, _) = spawn_provider(
        StatusCode::FORBIDDEN,
        json!({"error": {"code": 403, "message": "API key not valid. Please pass a valid API key."}}),
    )
    .await;

    let err = client(&base_url)
        .generate_content(&request())
        .await
        .unwrap_err();
    match err {
        LlmError::Auth { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("API key not valid"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn blocked_prompt_is_an_empty_answer() {
    let (base_url, _) = spawn_provider(
        StatusCode::OK,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}),
    )
    .await;

    let err = client(&base_url)
        .generate_content(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Empty(reason) if reason == "SAFETY"));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (base_url, _) = spawn_provider(StatusCode::OK, json!("not a response")).await;

    let err = client(&base_url)
        .generate_content(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .generate_content(&request())
        .await
        .unwrap_err();
    assert!(err.is_transient());
}
