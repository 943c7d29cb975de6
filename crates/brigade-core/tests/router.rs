use async_trait::async_trait;
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use brigade_config::{BrigadeConfig, RelayConfig};
use brigade_core::{
    AdvisorRelay, Assistant, AssistantRouter, CoreError, HttpAdvisorRelay, ImageInput, RelayError,
};
use brigade_llm::ModelClient;
use brigade_protocol::{Role, SessionId};
use brigade_test_utils::{ScriptedModel, sample_dataset, text_response};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct StubState {
    available: bool,
    probes: usize,
    replies: VecDeque<Result<String, String>>,
    messages: Vec<(String, SessionId)>,
}

#[derive(Debug, Clone, Default)]
struct StubRelay {
    state: Arc<Mutex<StubState>>,
}

impl StubRelay {
    fn available() -> Self {
        let relay = Self::default();
        relay.state.lock().available = true;
        relay
    }

    fn reply(self, reply: &str) -> Self {
        self.state.lock().replies.push_back(Ok(reply.to_string()));
        self
    }

    fn failure(self, message: &str) -> Self {
        self.state
            .lock()
            .replies
            .push_back(Err(message.to_string()));
        self
    }

    fn probes(&self) -> usize {
        self.state.lock().probes
    }

    fn messages(&self) -> Vec<(String, SessionId)> {
        self.state.lock().messages.clone()
    }
}

#[async_trait]
impl AdvisorRelay for StubRelay {
    async fn is_available(&self) -> bool {
        let mut state = self.state.lock();
        state.probes += 1;
        state.available
    }

    async fn chat_with_advisor(
        &self,
        message: &str,
        session_id: SessionId,
    ) -> Result<String, RelayError> {
        let mut state = self.state.lock();
        state.messages.push((message.to_string(), session_id));
        match state.replies.pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(RelayError::Transport(message)),
            None => Err(RelayError::Malformed("no scripted reply".to_string())),
        }
    }
}

fn router(model: &ScriptedModel, relay: &StubRelay, reprobe_after: Duration) -> AssistantRouter {
    let client: Arc<dyn ModelClient> = Arc::new(model.clone());
    let assistant = Assistant::new(
        &BrigadeConfig::default(),
        Arc::new(sample_dataset()),
        Some(client),
    )
    .expect("assistant");
    AssistantRouter::new(
        assistant.session(),
        Some(Arc::new(relay.clone())),
        reprobe_after,
    )
}

#[tokio::test]
async fn available_relay_answers_text_and_probes_once() {
    let model = ScriptedModel::new();
    let relay = StubRelay::available()
        .reply("Relay says hi.")
        .reply("Relay again.");
    let mut router = router(&model, &relay, Duration::from_secs(60));

    let first = router.submit("hello", None).await.expect("reply");
    let second = router.submit("again", None).await.expect("reply");

    assert_eq!(first.text, "Relay says hi.");
    assert_eq!(second.text, "Relay again.");
    assert_eq!(relay.probes(), 1);
    assert!(router.relay_available());
    assert_eq!(model.call_count(), 0);

    let transcript = router.session().transcript();
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript[1].role, Role::User);
    assert_eq!(transcript[1].text, "hello");
    assert_eq!(relay.messages()[0].1, router.session().id());
}

#[tokio::test]
async fn unavailable_relay_is_not_probed_again() {
    let model = ScriptedModel::new()
        .respond(text_response("Direct one."))
        .respond(text_response("Direct two."));
    let relay = StubRelay::default();
    let mut router = router(&model, &relay, Duration::ZERO);

    router.submit("one", None).await.expect("reply");
    let reply = router.submit("two", None).await.expect("reply");

    assert_eq!(reply.text, "Direct two.");
    assert_eq!(relay.probes(), 1);
    assert!(relay.messages().is_empty());
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn relay_failure_falls_back_and_suspends() {
    let model = ScriptedModel::new()
        .respond(text_response("Direct answer."))
        .respond(text_response("Still direct."));
    let relay = StubRelay::available().failure("connection reset");
    let mut router = router(&model, &relay, Duration::from_secs(3600));

    let first = router.submit("stock?", None).await.expect("reply");
    assert_eq!(first.text, "Direct answer.");
    assert!(!router.relay_available());

    let second = router.submit("and now?", None).await.expect("reply");
    assert_eq!(second.text, "Still direct.");
    assert_eq!(relay.probes(), 1);
    assert_eq!(relay.messages().len(), 1);

    let transcript = router.session().transcript();
    assert_eq!(transcript.len(), 5);
}

#[tokio::test]
async fn suspended_relay_is_reprobed_after_cooldown() {
    let model = ScriptedModel::new().respond(text_response("Direct answer."));
    let relay = StubRelay::available()
        .failure("timeout")
        .reply("Relay is back.");
    let mut router = router(&model, &relay, Duration::ZERO);

    router.submit("first", None).await.expect("reply");
    let second = router.submit("second", None).await.expect("reply");

    assert_eq!(second.text, "Relay is back.");
    assert_eq!(relay.probes(), 2);
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn image_messages_bypass_relay() {
    let model = ScriptedModel::new().respond(text_response("Nice plating."));
    let relay = StubRelay::available().reply("unused");
    let mut router = router(&model, &relay, Duration::from_secs(60));

    let image = ImageInput::from_bytes("plate.jpg", "image/jpeg", b"jpeg").expect("image");
    let reply = router
        .submit("How does this look?", Some(image))
        .await
        .expect("reply");

    assert_eq!(reply.text, "Nice plating.");
    assert_eq!(relay.probes(), 0);
    assert!(relay.messages().is_empty());
}

#[tokio::test]
async fn router_rejects_empty_input_before_probing() {
    let model = ScriptedModel::new();
    let relay = StubRelay::available();
    let mut router = router(&model, &relay, Duration::from_secs(60));

    let err = router.submit("  ", None).await.unwrap_err();
    assert!(matches!(err, CoreError::EmptyInput));
    assert_eq!(relay.probes(), 0);
}

#[tokio::test]
async fn reset_keeps_relay_state_and_changes_session() {
    let model = ScriptedModel::new();
    let relay = StubRelay::available().reply("a").reply("b");
    let mut router = router(&model, &relay, Duration::from_secs(60));

    router.submit("one", None).await.expect("reply");
    let before = router.session().id();
    router.reset();
    router.submit("two", None).await.expect("reply");

    assert_eq!(relay.probes(), 1);
    let messages = relay.messages();
    assert_eq!(messages[0].1, before);
    assert_ne!(messages[1].1, before);
    assert_eq!(router.session().transcript().len(), 3);
}

async fn spawn_advisor(health: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let app = Router::new()
        .route("/health", get(move || async move { health }))
        .route(
            "/api/advisor/chat",
            post(move |Json(body): Json<Value>| {
                let recorder = recorder.clone();
                let reply = reply.clone();
                async move {
                    recorder.lock().push(body);
                    Json(reply)
                }
            }),
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

fn http_relay(base_url: &str) -> HttpAdvisorRelay {
    let config = RelayConfig {
        enabled: true,
        base_url: Some(base_url.to_string()),
        ..RelayConfig::default()
    };
    HttpAdvisorRelay::from_config(&config, Duration::from_secs(5))
        .expect("relay")
        .expect("enabled relay")
}

#[tokio::test]
async fn http_relay_probes_and_posts_messages() {
    let (base_url, seen) = spawn_advisor(StatusCode::OK, json!({"response": "Order more basil."})).await;
    let relay = http_relay(&base_url);
    let session_id = uuid::Uuid::new_v4();

    assert!(relay.is_available().await);
    let reply = relay
        .chat_with_advisor("What should I order?", session_id)
        .await
        .expect("reply");

    assert_eq!(reply, "Order more basil.");
    let body = seen.lock()[0].clone();
    assert_eq!(body["message"], json!("What should I order?"));
    assert_eq!(body["session_id"], json!(session_id.to_string()));
}

#[tokio::test]
async fn http_relay_reports_unhealthy_backend() {
    let (base_url, _) = spawn_advisor(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
    assert!(!http_relay(&base_url).is_available().await);
}

#[tokio::test]
async fn http_relay_rejects_reply_without_text() {
    let (base_url, _) = spawn_advisor(StatusCode::OK, json!({"status": "ok"})).await;
    let err = http_relay(&base_url)
        .chat_with_advisor("hi", uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_relay_is_unavailable() {
    let relay = http_relay("http://127.0.0.1:1");
    assert!(!relay.is_available().await);
}

#[test]
fn disabled_relay_is_not_built() {
    let config = RelayConfig {
        base_url: Some("http://localhost:8000".to_string()),
        ..RelayConfig::default()
    };
    let relay = HttpAdvisorRelay::from_config(&config, Duration::from_secs(5)).expect("relay");
    assert!(relay.is_none());
}
