//! Reorder suggestion synthesis.

use super::{money, parse_args, search_term, single_string_schema};
use crate::{RestaurantDataset, Supplier, Tool, ToolName};
use brigade_protocol::ToolError;
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Marker used when no supplier quotes a price.
const COST_UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReorderArgs {
    ingredient_name: String,
}

#[derive(Debug, Default)]
pub struct ReorderSuggestionTool;

impl Tool for ReorderSuggestionTool {
    fn name(&self) -> ToolName {
        ToolName::CreateReorderSuggestion
    }

    fn description(&self) -> &str {
        "Draft a reorder for an ingredient: twice the current stock from the most \
         reliable supplier carrying it, with an estimated cost when a price is known."
    }

    fn args_schema(&self) -> Value {
        single_string_schema("ingredient_name", "Ingredient to reorder, e.g. 'olive oil'")
    }

    fn call(
        &self,
        dataset: &RestaurantDataset,
        args: &Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let args: ReorderArgs = parse_args(args)?;
        let term = search_term(&args.ingredient_name, "ingredient_name")?;
        let ingredient = dataset.find_ingredient(term).ok_or_else(|| {
            ToolError::NotFound(format!("no ingredient matching '{term}' in inventory"))
        })?;

        let quantity = suggested_quantity(ingredient.current_inventory);
        let mut candidates = dataset.suppliers_for(term);
        if candidates.is_empty() {
            candidates = dataset.suppliers_for(&ingredient.name);
        }
        let supplier = most_reliable(&candidates);
        let unit_price = supplier.and_then(|supplier| {
            supplier
                .unit_price(term)
                .or_else(|| supplier.unit_price(&ingredient.name))
        });
        let estimated_cost = match unit_price {
            Some(price) => money(price * quantity as f64),
            None => COST_UNAVAILABLE.to_string(),
        };

        Ok(json!({
            "ingredient": ingredient.name,
            "current_stock": ingredient.current_inventory,
            "unit": ingredient.unit,
            "suggested_quantity": quantity,
            "supplier": supplier.map(|supplier| supplier.name.as_str()),
            "supplier_reliability": supplier.map(|supplier| supplier.reliability_score),
            "lead_time_days": supplier.map(|supplier| supplier.lead_time_days),
            "unit_price": unit_price,
            "estimated_cost": estimated_cost,
            "cost_available": unit_price.is_some(),
        }))
    }
}

/// Twice the current stock, rounded up. Negative stock counts as zero.
fn suggested_quantity(current: f64) -> u64 {
    (current.max(0.0) * 2.0).ceil() as u64
}

/// Highest reliability wins; ties keep dataset order.
fn most_reliable<'a>(suppliers: &[&'a Supplier]) -> Option<&'a Supplier> {
    suppliers.iter().copied().fold(None, |best, supplier| match best {
        Some(current) if current.reliability_score >= supplier.reliability_score => Some(current),
        _ => Some(supplier),
    })
}
