//! Dispatcher that executes tool calls against the dataset.

use crate::{RestaurantDataset, ToolName, ToolRegistry};
use brigade_protocol::{ToolCallRequest, ToolCallResult, ToolError};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Executes named tool calls. Never fails: every outcome, including an
/// unknown name, becomes a [`ToolCallResult`].
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    registry: ToolRegistry,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run `name` with `arguments` against `dataset`.
    pub fn execute(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
        dataset: &RestaurantDataset,
    ) -> ToolCallResult {
        match self.try_execute(name, arguments, dataset) {
            Ok(result) => {
                debug!("tool call succeeded (name={})", name);
                ToolCallResult::ok(name, result)
            }
            Err(err) => {
                warn!("tool call returned error (name={}, error={})", name, err);
                ToolCallResult::error(name, err.to_string())
            }
        }
    }

    /// Run a model-issued request.
    pub fn execute_request(
        &self,
        request: &ToolCallRequest,
        dataset: &RestaurantDataset,
    ) -> ToolCallResult {
        self.execute(&request.name, &request.arguments, dataset)
    }

    fn try_execute(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
        dataset: &RestaurantDataset,
    ) -> Result<Value, ToolError> {
        let tool_name: ToolName = name.parse()?;
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownFunction(name.to_string()))?;
        tool.call(dataset, arguments)
    }
}
