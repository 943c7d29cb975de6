//! Tool trait, catalogue names and metadata spec.

use crate::RestaurantDataset;
use brigade_protocol::ToolError;
use serde_json::{Map, Value};
use std::fmt::{self, Debug};
use std::str::FromStr;

/// The closed tool catalogue. Names are a stable contract with the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolName {
    CheckInventory,
    SearchMenu,
    GetSupplierInfo,
    GetDailyStats,
    GetLowStockAlerts,
    CreateReorderSuggestion,
}

impl ToolName {
    /// Every catalogue entry, in declaration order.
    pub const ALL: [ToolName; 6] = [
        ToolName::CheckInventory,
        ToolName::SearchMenu,
        ToolName::GetSupplierInfo,
        ToolName::GetDailyStats,
        ToolName::GetLowStockAlerts,
        ToolName::CreateReorderSuggestion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::CheckInventory => "check_inventory",
            ToolName::SearchMenu => "search_menu",
            ToolName::GetSupplierInfo => "get_supplier_info",
            ToolName::GetDailyStats => "get_daily_stats",
            ToolName::GetLowStockAlerts => "get_low_stock_alerts",
            ToolName::CreateReorderSuggestion => "create_reorder_suggestion",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|name| name.as_str() == value)
            .ok_or_else(|| ToolError::UnknownFunction(value.to_string()))
    }
}

/// Tool metadata for declaration to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: ToolName,
    pub description: String,
    /// JSON schema for tool arguments.
    pub args_schema: Value,
}

/// A domain function answered purely from the restaurant dataset.
///
/// Implementations never mutate the dataset and never call the model.
pub trait Tool: Send + Sync + Debug {
    /// Catalogue entry this tool implements.
    fn name(&self) -> ToolName;
    /// Description shown to the model.
    fn description(&self) -> &str;
    /// JSON schema for tool arguments.
    fn args_schema(&self) -> Value;

    /// Run the tool. Lookup misses are `ToolError::NotFound`, not empty
    /// success payloads.
    fn call(&self, dataset: &RestaurantDataset, args: &Map<String, Value>)
    -> Result<Value, ToolError>;

    /// Build a `ToolSpec` describing this tool.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name(),
            description: self.description().to_string(),
            args_schema: self.args_schema(),
        }
    }
}
