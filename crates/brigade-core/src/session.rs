//! Conversation session and the bounded tool-calling loop.

use crate::assembler::assemble_message;
use crate::assistant::Assistant;
use crate::attachment::ImageInput;
use crate::error::CoreError;
use crate::model_session::ModelSession;
use crate::prompt::DEFAULT_IMAGE_INSTRUCTION;
use brigade_llm::{Content, LlmError, ModelClient, Part};
use brigade_protocol::{Message, SessionId, ToolCallRequest, ToolCallResult};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Error returned for function calls left pending when a turn hits the
/// round cap. Recorded in the history only, never sent on its own.
pub const TOOL_ROUND_LIMIT_ERROR: &str = "tool round limit reached";

/// One conversation: the visible transcript and, once the first message has
/// been sent, the live model handle.
///
/// `submit` takes `&mut self`, so a second message cannot start on the same
/// session while a turn is outstanding.
#[derive(Debug)]
pub struct ConversationSession {
    id: SessionId,
    assistant: Assistant,
    transcript: Vec<Message>,
    handle: Option<ModelSession>,
}

impl ConversationSession {
    pub(crate) fn new(assistant: Assistant) -> Self {
        let id = Uuid::new_v4();
        info!("created conversation session (session_id={})", id);
        let transcript = vec![Message::assistant(assistant.settings().seed_greeting.clone())];
        Self {
            id,
            assistant,
            transcript,
            handle: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Visible transcript, oldest first. Starts with the seed greeting.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Whether a live model handle is currently held.
    pub fn has_live_handle(&self) -> bool {
        self.handle.is_some()
    }

    /// Start a new chat: transcript back to the greeting, handle dropped,
    /// fresh session id. No network traffic.
    pub fn reset(&mut self) {
        let previous = self.id;
        self.id = Uuid::new_v4();
        self.handle = None;
        self.transcript = vec![Message::assistant(
            self.assistant.settings().seed_greeting.clone(),
        )];
        info!(
            "reset conversation session (previous_id={}, session_id={})",
            previous, self.id
        );
    }

    /// Drive one user turn to completion and return the assistant message.
    ///
    /// Provider failures do not surface as errors: the handle is discarded
    /// and the returned message explains what went wrong. The only error is
    /// an empty submission.
    pub async fn submit(
        &mut self,
        text: &str,
        image: Option<ImageInput>,
    ) -> Result<Message, CoreError> {
        let text = text.trim();
        if text.is_empty() && image.is_none() {
            return Err(CoreError::EmptyInput);
        }

        let mut user = Message::user(text);
        if let Some(image) = &image {
            user = user.with_image(image.image_ref());
        }
        self.transcript.push(user);

        let Some(client) = self.assistant.client().cloned() else {
            warn!(
                "turn skipped, provider not configured (session_id={})",
                self.id
            );
            return Ok(self.push_reply(Message::assistant(self.assistant.not_configured_text())));
        };

        debug!(
            "starting turn (session_id={}, text_len={}, has_image={})",
            self.id,
            text.len(),
            image.is_some()
        );
        let reply = match self.run_turn(client, text, image.as_ref()).await {
            Ok(message) => message,
            Err(err) => {
                warn!(
                    "turn failed, discarding model handle (session_id={}, error={})",
                    self.id, err
                );
                self.handle = None;
                Message::assistant(failure_text(&err))
            }
        };
        Ok(self.push_reply(reply))
    }

    /// Append an exchange answered outside this session (the relay).
    pub(crate) fn record_exchange(&mut self, user: Message, reply: Message) -> Message {
        self.transcript.push(user);
        self.push_reply(reply)
    }

    fn push_reply(&mut self, reply: Message) -> Message {
        self.transcript.push(reply.clone());
        reply
    }

    async fn run_turn(
        &mut self,
        client: Arc<dyn ModelClient>,
        text: &str,
        image: Option<&ImageInput>,
    ) -> Result<Message, LlmError> {
        let assistant = &self.assistant;
        let max_rounds = assistant.settings().max_tool_rounds;
        let handle = self
            .handle
            .get_or_insert_with(|| assistant.open_model_session(client));

        let mut response = handle.send(user_content(text, image)).await?;
        let mut invocations: Vec<String> = Vec::new();
        // The opening request counts as the first round.
        let mut rounds = 1;
        loop {
            let calls = response
                .function_calls()
                .into_iter()
                .map(|call| ToolCallRequest::new(call.name.clone(), call.args.clone()))
                .collect::<Vec<_>>();
            if calls.is_empty() {
                break;
            }
            if rounds >= max_rounds {
                warn!(
                    "tool round cap reached, using last response (rounds={}, pending_calls={})",
                    rounds,
                    calls.len()
                );
                let closed = calls
                    .iter()
                    .map(|call| ToolCallResult::error(call.name.clone(), TOOL_ROUND_LIMIT_ERROR))
                    .collect::<Vec<_>>();
                handle.record(Content::function_results(&closed));
                break;
            }
            rounds += 1;

            let results = calls
                .iter()
                .map(|call| {
                    invocations.push(call.name.clone());
                    assistant
                        .dispatcher()
                        .execute_request(call, assistant.dataset())
                })
                .collect::<Vec<_>>();
            debug!(
                "sending tool results (round={}, results={})",
                rounds,
                results.len()
            );
            response = handle.send(Content::function_results(&results)).await?;
        }

        Ok(assemble_message(&response, &invocations))
    }
}

fn user_content(text: &str, image: Option<&ImageInput>) -> Content {
    match image {
        Some(image) => {
            let caption = if text.is_empty() {
                DEFAULT_IMAGE_INSTRUCTION
            } else {
                text
            };
            Content::user(vec![image.to_part(), Part::text(caption)])
        }
        None => Content::user(vec![Part::text(text)]),
    }
}

fn failure_text(err: &LlmError) -> String {
    format!(
        "Sorry, I ran into a problem talking to the assistant service: {err}. \
         Please try again in a moment."
    )
}
