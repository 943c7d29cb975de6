//! Dataset-wide rollups: daily stats and low-stock alerts.

use super::{money, no_args_schema};
use crate::{RestaurantDataset, RiskTier, Tool, ToolName};
use brigade_protocol::ToolError;
use serde_json::{Map, Value, json};

/// Dishes counted towards the revenue estimate.
const REVENUE_TOP_DISHES: usize = 5;

#[derive(Debug, Default)]
pub struct DailyStatsTool;

impl Tool for DailyStatsTool {
    fn name(&self) -> ToolName {
        ToolName::GetDailyStats
    }

    fn description(&self) -> &str {
        "Summarize today's service: total orders today and over the last 7 days, \
         estimated revenue from the top 5 dishes, and counts of CRITICAL and URGENT ingredients."
    }

    fn args_schema(&self) -> Value {
        no_args_schema()
    }

    fn call(
        &self,
        dataset: &RestaurantDataset,
        _args: &Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let total_today: u64 = dataset
            .dishes
            .iter()
            .map(|dish| u64::from(dish.orders_today))
            .sum();
        let total_week: u64 = dataset
            .dishes
            .iter()
            .map(|dish| u64::from(dish.orders_last_7_days))
            .sum();

        let mut top = dataset.dishes.iter().collect::<Vec<_>>();
        top.sort_by(|a, b| b.orders_today.cmp(&a.orders_today));
        top.truncate(REVENUE_TOP_DISHES);
        let revenue: f64 = top
            .iter()
            .map(|dish| dish.price * f64::from(dish.orders_today))
            .sum();

        let count_tier = |tier: RiskTier| {
            dataset
                .ingredients
                .iter()
                .filter(|ingredient| ingredient.risk_tier == tier)
                .count()
        };

        Ok(json!({
            "total_orders_today": total_today,
            "total_orders_last_7_days": total_week,
            "estimated_revenue_today": money(revenue),
            "top_dishes": top.iter().map(|dish| dish.name.as_str()).collect::<Vec<_>>(),
            "critical_ingredients": count_tier(RiskTier::Critical),
            "urgent_ingredients": count_tier(RiskTier::Urgent),
        }))
    }
}

#[derive(Debug, Default)]
pub struct LowStockAlertsTool;

impl Tool for LowStockAlertsTool {
    fn name(&self) -> ToolName {
        ToolName::GetLowStockAlerts
    }

    fn description(&self) -> &str {
        "List every ingredient at CRITICAL, URGENT or MONITOR risk, most urgent \
         (fewest days of cover) first."
    }

    fn args_schema(&self) -> Value {
        no_args_schema()
    }

    fn call(
        &self,
        dataset: &RestaurantDataset,
        _args: &Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let mut flagged = dataset
            .ingredients
            .iter()
            .filter(|ingredient| ingredient.risk_tier.needs_attention())
            .collect::<Vec<_>>();
        flagged.sort_by(|a, b| a.days_of_cover.total_cmp(&b.days_of_cover));

        let alerts = flagged
            .iter()
            .map(|ingredient| {
                json!({
                    "name": ingredient.name,
                    "risk_tier": ingredient.risk_tier.as_str(),
                    "days_of_cover": ingredient.days_of_cover,
                    "current_inventory": ingredient.current_inventory,
                    "unit": ingredient.unit,
                })
            })
            .collect::<Vec<_>>();
        Ok(json!({
            "count": alerts.len(),
            "alerts": alerts,
        }))
    }
}
