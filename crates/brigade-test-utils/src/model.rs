use async_trait::async_trait;
use brigade_llm::{GenerateContentRequest, GenerateContentResponse, LlmError, ModelClient};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One scripted provider reaction.
#[derive(Debug)]
pub enum ScriptStep {
    Respond(GenerateContentResponse),
    Fail(LlmError),
}

#[derive(Debug, Default)]
struct ScriptState {
    steps: VecDeque<ScriptStep>,
    repeat: Option<GenerateContentResponse>,
    requests: Vec<GenerateContentRequest>,
}

/// Model client that replays queued steps and records every request.
///
/// Once the queue is empty the `repeat` response (if any) is returned
/// forever; otherwise calls fail with `LlmError::Empty`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: GenerateContentResponse) -> Self {
        self.state.lock().steps.push_back(ScriptStep::Respond(response));
        self
    }

    pub fn fail(self, error: LlmError) -> Self {
        self.state.lock().steps.push_back(ScriptStep::Fail(error));
        self
    }

    pub fn repeat(self, response: GenerateContentResponse) -> Self {
        self.state.lock().repeat = Some(response);
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.state.lock().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().requests.len()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());
        match state.steps.pop_front() {
            Some(ScriptStep::Respond(response)) => Ok(response),
            Some(ScriptStep::Fail(error)) => Err(error),
            None => state
                .repeat
                .clone()
                .ok_or_else(|| LlmError::Empty("script exhausted".to_string())),
        }
    }
}

/// Model client that always fails with a transport error.
#[derive(Debug, Clone)]
pub struct FailingModel {
    message: String,
    calls: Arc<Mutex<usize>>,
}

impl FailingModel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl ModelClient for FailingModel {
    fn model(&self) -> &str {
        "failing"
    }

    async fn generate_content(
        &self,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        *self.calls.lock() += 1;
        Err(LlmError::Transport(self.message.clone()))
    }
}
