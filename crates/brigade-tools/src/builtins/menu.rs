//! Menu search by dish name or category.

use super::{parse_args, search_term, single_string_schema};
use crate::{RestaurantDataset, Tool, ToolName};
use brigade_protocol::ToolError;
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Maximum dishes returned per search.
const MAX_RESULTS: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MenuArgs {
    query: String,
}

#[derive(Debug, Default)]
pub struct SearchMenuTool;

impl Tool for SearchMenuTool {
    fn name(&self) -> ToolName {
        ToolName::SearchMenu
    }

    fn description(&self) -> &str {
        "Search the menu by dish name or category. Returns up to 8 dishes with price, \
         order counts, trend and popularity rank, plus the total number of matches."
    }

    fn args_schema(&self) -> Value {
        single_string_schema("query", "Dish name or category fragment, e.g. 'pizza'")
    }

    fn call(
        &self,
        dataset: &RestaurantDataset,
        args: &Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let args: MenuArgs = parse_args(args)?;
        let term = search_term(&args.query, "query")?;
        let matches = dataset.search_dishes(term);
        if matches.is_empty() {
            return Err(ToolError::NotFound(format!(
                "no dishes matching '{term}' on the menu"
            )));
        }
        let results = matches
            .iter()
            .take(MAX_RESULTS)
            .map(|dish| {
                json!({
                    "name": dish.name,
                    "category": dish.category,
                    "price": dish.price,
                    "orders_today": dish.orders_today,
                    "orders_last_7_days": dish.orders_last_7_days,
                    "trend": dish.trend,
                    "popularity_rank": dish.popularity_rank,
                })
            })
            .collect::<Vec<_>>();
        Ok(json!({
            "query": term,
            "total_matches": matches.len(),
            "results": results,
        }))
    }
}
