//! Shared fixtures for brigade tests: scripted model clients, response
//! builders and a sample restaurant dataset.

pub mod dataset;
pub mod model;
pub mod responses;

pub use dataset::sample_dataset;
pub use model::{FailingModel, ScriptStep, ScriptedModel};
pub use responses::*;
