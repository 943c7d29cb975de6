//! Ingredient stock lookup.

use super::{parse_args, search_term, single_string_schema};
use crate::{RestaurantDataset, Tool, ToolName};
use brigade_protocol::ToolError;
use serde::Deserialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InventoryArgs {
    ingredient_name: String,
}

#[derive(Debug, Default)]
pub struct CheckInventoryTool;

impl Tool for CheckInventoryTool {
    fn name(&self) -> ToolName {
        ToolName::CheckInventory
    }

    fn description(&self) -> &str {
        "Look up current stock for an ingredient: quantity on hand, unit, risk tier, \
         days of cover, stockout probability and usage trend."
    }

    fn args_schema(&self) -> Value {
        single_string_schema(
            "ingredient_name",
            "Ingredient to look up; partial names match, e.g. 'olive oil'",
        )
    }

    fn call(
        &self,
        dataset: &RestaurantDataset,
        args: &Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let args: InventoryArgs = parse_args(args)?;
        let term = search_term(&args.ingredient_name, "ingredient_name")?;
        let ingredient = dataset.find_ingredient(term).ok_or_else(|| {
            ToolError::NotFound(format!("no ingredient matching '{term}' in inventory"))
        })?;
        Ok(json!({
            "name": ingredient.name,
            "current_inventory": ingredient.current_inventory,
            "unit": ingredient.unit,
            "risk_tier": ingredient.risk_tier.as_str(),
            "days_of_cover": ingredient.days_of_cover,
            "stockout_probability": ingredient.stockout_probability,
            "trend": ingredient.trend,
        }))
    }
}
