//! Transport selection between the backend advisor relay and the direct
//! provider path.
//!
//! The relay is probed lazily before the first text-only message and the
//! answer is cached. A failed relay call falls back to the direct path and
//! suspends the relay for a cooldown; the first text message after the
//! cooldown re-probes. Image messages always go direct.

use crate::attachment::ImageInput;
use crate::error::CoreError;
use crate::session::ConversationSession;
use async_trait::async_trait;
use brigade_config::RelayConfig;
use brigade_protocol::{Message, SessionId};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors returned by an advisor relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay unreachable: {0}")]
    Transport(String),
    #[error("relay timed out")]
    Timeout,
    #[error("relay error (status {status}): {message}")]
    Http { status: u16, message: String },
    #[error("relay returned an unusable reply: {0}")]
    Malformed(String),
}

/// Backend relay that answers text-only messages on the assistant's behalf.
#[async_trait]
pub trait AdvisorRelay: Send + Sync + fmt::Debug {
    /// Feature probe: is the backend reachable.
    async fn is_available(&self) -> bool;

    /// Send one message and return the advisor's reply text.
    async fn chat_with_advisor(
        &self,
        message: &str,
        session_id: SessionId,
    ) -> Result<String, RelayError>;
}

#[derive(Debug, Serialize)]
struct AdvisorRequest<'a> {
    message: &'a str,
    session_id: SessionId,
}

#[derive(Debug, Deserialize)]
struct AdvisorReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// JSON-over-HTTP advisor relay.
#[derive(Debug, Clone)]
pub struct HttpAdvisorRelay {
    http: reqwest::Client,
    health_url: String,
    chat_url: String,
    probe_timeout: Duration,
}

impl HttpAdvisorRelay {
    pub fn new(
        base_url: &str,
        config: &RelayConfig,
        request_timeout: Duration,
    ) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| RelayError::Transport(err.to_string()))?;
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            http,
            health_url: format!("{base}{}", config.health_path),
            chat_url: format!("{base}{}", config.chat_path),
            probe_timeout: config.probe_timeout(),
        })
    }

    /// Build a relay when the config enables one.
    pub fn from_config(
        config: &RelayConfig,
        request_timeout: Duration,
    ) -> Result<Option<Self>, RelayError> {
        match (&config.base_url, config.enabled) {
            (Some(base_url), true) => Ok(Some(Self::new(base_url, config, request_timeout)?)),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl AdvisorRelay for HttpAdvisorRelay {
    async fn is_available(&self) -> bool {
        match self
            .http
            .get(&self.health_url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("relay probe failed (url={}, error={})", self.health_url, err);
                false
            }
        }
    }

    async fn chat_with_advisor(
        &self,
        message: &str,
        session_id: SessionId,
    ) -> Result<String, RelayError> {
        let response = self
            .http
            .post(&self.chat_url)
            .json(&AdvisorRequest {
                message,
                session_id,
            })
            .send()
            .await
            .map_err(relay_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(relay_transport_error)?;
        if !status.is_success() {
            return Err(RelayError::Http {
                status: status.as_u16(),
                message: body.trim().chars().take(300).collect(),
            });
        }
        let reply: AdvisorReply =
            serde_json::from_str(&body).map_err(|err| RelayError::Malformed(err.to_string()))?;
        reply
            .response
            .or(reply.message)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| RelayError::Malformed("reply has no response text".to_string()))
    }
}

fn relay_transport_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout
    } else {
        RelayError::Transport(err.to_string())
    }
}

/// Cached relay availability for one router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelayState {
    NotProbed,
    Available,
    Unavailable,
    Suspended { until: Instant },
}

/// Per-conversation transport selector wrapping a [`ConversationSession`].
#[derive(Debug)]
pub struct AssistantRouter {
    session: ConversationSession,
    relay: Option<Arc<dyn AdvisorRelay>>,
    state: RelayState,
    reprobe_after: Duration,
}

impl AssistantRouter {
    pub fn new(
        session: ConversationSession,
        relay: Option<Arc<dyn AdvisorRelay>>,
        reprobe_after: Duration,
    ) -> Self {
        Self {
            session,
            relay,
            state: RelayState::NotProbed,
            reprobe_after,
        }
    }

    /// Router that always uses the direct path.
    pub fn direct(session: ConversationSession) -> Self {
        Self::new(session, None, Duration::ZERO)
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Whether the last probe found the relay usable.
    pub fn relay_available(&self) -> bool {
        self.state == RelayState::Available
    }

    /// New chat. Relay availability stays cached.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Route one message and return the assistant reply.
    pub async fn submit(
        &mut self,
        text: &str,
        image: Option<ImageInput>,
    ) -> Result<Message, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() && image.is_none() {
            return Err(CoreError::EmptyInput);
        }
        if image.is_none()
            && let Some(relay) = self.usable_relay().await
        {
            let session_id = self.session.id();
            match relay.chat_with_advisor(trimmed, session_id).await {
                Ok(reply) => {
                    debug!("relay answered (session_id={})", session_id);
                    return Ok(self
                        .session
                        .record_exchange(Message::user(trimmed), Message::assistant(reply)));
                }
                Err(err) => {
                    warn!(
                        "relay failed, falling back to direct path (session_id={}, error={})",
                        session_id, err
                    );
                    self.state = RelayState::Suspended {
                        until: Instant::now() + self.reprobe_after,
                    };
                }
            }
        }
        self.session.submit(trimmed, image).await
    }

    async fn usable_relay(&mut self) -> Option<Arc<dyn AdvisorRelay>> {
        let relay = self.relay.clone()?;
        let should_probe = match self.state {
            RelayState::NotProbed => true,
            RelayState::Suspended { until } => Instant::now() >= until,
            RelayState::Available | RelayState::Unavailable => false,
        };
        if should_probe {
            let available = relay.is_available().await;
            info!("relay probe finished (available={})", available);
            self.state = if available {
                RelayState::Available
            } else {
                RelayState::Unavailable
            };
        }
        (self.state == RelayState::Available).then_some(relay)
    }
}
