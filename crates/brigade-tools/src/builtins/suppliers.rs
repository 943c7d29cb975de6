//! Supplier lookup by ingredient.

use super::{parse_args, search_term, single_string_schema};
use crate::{RestaurantDataset, Tool, ToolName};
use brigade_protocol::ToolError;
use serde::Deserialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SupplierArgs {
    ingredient_name: String,
}

#[derive(Debug, Default)]
pub struct SupplierInfoTool;

impl Tool for SupplierInfoTool {
    fn name(&self) -> ToolName {
        ToolName::GetSupplierInfo
    }

    fn description(&self) -> &str {
        "List suppliers that carry an ingredient, with lead time, reliability score, \
         shipping cost and the unit price when the supplier quotes one."
    }

    fn args_schema(&self) -> Value {
        single_string_schema("ingredient_name", "Ingredient to source, e.g. 'mozzarella'")
    }

    fn call(
        &self,
        dataset: &RestaurantDataset,
        args: &Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let args: SupplierArgs = parse_args(args)?;
        let term = search_term(&args.ingredient_name, "ingredient_name")?;
        let suppliers = dataset.suppliers_for(term);
        if suppliers.is_empty() {
            return Err(ToolError::NotFound(format!(
                "no suppliers found for '{term}'"
            )));
        }
        let records = suppliers
            .iter()
            .map(|supplier| {
                json!({
                    "supplier": supplier.name,
                    "lead_time_days": supplier.lead_time_days,
                    "reliability_score": supplier.reliability_score,
                    "shipping_cost": supplier.shipping_cost,
                    "unit_price": supplier.unit_price(term),
                })
            })
            .collect::<Vec<_>>();
        Ok(json!({
            "ingredient": term,
            "suppliers": records,
        }))
    }
}
