//! Generative model client for the brigade assistant.
//!
//! Holds the `generateContent` wire types, the [`ContentPart`] view used to
//! fold heterogeneous responses, the [`ModelClient`] seam and its HTTP
//! implementation.

mod client;
mod error;
mod part;
pub mod wire;

pub use client::{GeminiClient, ModelClient};
pub use error::LlmError;
pub use part::ContentPart;
pub use wire::{
    Candidate, Content, FunctionDeclaration, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, GroundingMetadata, Part, ToolSet,
};
