//! Core orchestration for the brigade restaurant assistant.
//!
//! This crate owns the conversation session and its bounded tool loop, the
//! response assembler, the relay/direct transport selection, and the
//! schema-constrained insight generator used by dashboard widgets.

mod assembler;
mod assistant;
pub mod attachment;
pub mod error;
pub mod insights;
mod model_session;
pub mod prompt;
pub mod resilience;
mod session;

pub use assembler::{
    CODE_EXECUTION_BADGE, DEFAULT_SOURCE_TITLE, EMPTY_RESPONSE_TEXT, PLACEHOLDER_SOURCE_URI,
    SEARCH_BADGE, assemble_message,
};
pub use assistant::Assistant;
pub use attachment::ImageInput;
pub use error::{CoreError, InsightError};
pub use insights::{InsightCache, InsightGenerator, InsightKind, InsightPayload, InsightState};
pub use model_session::ModelSession;
pub use resilience::{AdvisorRelay, AssistantRouter, HttpAdvisorRelay, RelayError};
pub use session::{ConversationSession, TOOL_ROUND_LIMIT_ERROR};
