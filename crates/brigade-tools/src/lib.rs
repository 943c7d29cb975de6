//! Restaurant dataset model and the domain tools the assistant can call.
//!
//! The catalogue is closed: [`ToolRegistry`] refuses to build unless every
//! [`ToolName`] has exactly one implementation, and [`ToolDispatcher`] turns
//! every call, including unknown names, into a well-formed result.

pub mod builtins;
mod dataset;
mod dispatcher;
mod error;
mod registry;
mod tool;

pub use builtins::builtin_tool_registry;
pub use dataset::{
    DatasetError, Dish, Ingredient, RestaurantDataset, RestaurantProfile, RiskTier, Supplier,
};
pub use dispatcher::ToolDispatcher;
pub use error::RegistryError;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolName, ToolSpec};
