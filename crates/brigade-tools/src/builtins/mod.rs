//! Built-in restaurant tools.

mod inventory;
mod menu;
mod reorder;
mod stats;
mod suppliers;

use crate::{RegistryError, Tool, ToolRegistry};
use brigade_protocol::ToolError;
use log::info;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;

pub use inventory::CheckInventoryTool;
pub use menu::SearchMenuTool;
pub use reorder::ReorderSuggestionTool;
pub use stats::{DailyStatsTool, LowStockAlertsTool};
pub use suppliers::SupplierInfoTool;

/// Every built-in tool, one per catalogue entry.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(CheckInventoryTool),
        Arc::new(SearchMenuTool),
        Arc::new(SupplierInfoTool),
        Arc::new(DailyStatsTool),
        Arc::new(LowStockAlertsTool),
        Arc::new(ReorderSuggestionTool),
    ]
}

/// Build the closed registry of built-in tools.
pub fn builtin_tool_registry() -> Result<ToolRegistry, RegistryError> {
    let registry = ToolRegistry::new(builtin_tools())?;
    info!("registered built-in tools (count={})", registry.len());
    Ok(registry)
}

/// Decode model-supplied arguments into a typed struct.
fn parse_args<T: DeserializeOwned>(args: &Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

/// Trim a lookup term, rejecting blanks so they cannot match everything.
fn search_term<'a>(value: &'a str, field: &str) -> Result<&'a str, ToolError> {
    let term = value.trim();
    if term.is_empty() {
        return Err(ToolError::InvalidArguments(format!(
            "{field} must not be empty"
        )));
    }
    Ok(term)
}

/// Schema for tools taking a single required string argument.
fn single_string_schema(field: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: {"type": "string", "description": description}
        },
        "required": [field]
    })
}

/// Schema for tools taking no arguments.
fn no_args_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

/// Format a money amount with two decimals.
fn money(amount: f64) -> String {
    format!("{amount:.2}")
}
