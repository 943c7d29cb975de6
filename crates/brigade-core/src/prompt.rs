//! System instruction and dataset context rendering.

use brigade_config::AssistantConfig;
use brigade_tools::{RestaurantDataset, ToolSpec};

/// Instruction sent with a photo that has no caption.
pub const DEFAULT_IMAGE_INSTRUCTION: &str = "Analyze this photo for the restaurant. \
If it shows a plated dish or menu item, identify it, match it to our menu if possible and \
comment on presentation and portioning. If it is an invoice or receipt, extract the supplier, \
line items, quantities, unit prices and total, and flag prices that differ from our usual \
suppliers. If it shows shelves, a walk-in or stock, estimate quantities of visible ingredients \
and compare them with current inventory and risk levels. Use the tools to check our data.";

/// Dishes and alerts listed in the context summary.
const SUMMARY_LIST_LIMIT: usize = 5;

/// Render a compact, model-facing summary of the dataset.
pub fn context_summary(dataset: &RestaurantDataset) -> String {
    let restaurant = &dataset.restaurant;
    let cuisine = if restaurant.cuisine.is_empty() {
        "unspecified"
    } else {
        restaurant.cuisine.as_str()
    };
    let mut lines = vec![format!("Restaurant: {} ({cuisine} cuisine)", restaurant.name)];

    let orders_today: u64 = dataset
        .dishes
        .iter()
        .map(|dish| u64::from(dish.orders_today))
        .sum();
    let orders_week: u64 = dataset
        .dishes
        .iter()
        .map(|dish| u64::from(dish.orders_last_7_days))
        .sum();
    lines.push(format!(
        "Menu: {} dishes, {orders_today} orders today, {orders_week} orders in the last 7 days",
        dataset.dishes.len()
    ));

    let mut top = dataset.dishes.iter().collect::<Vec<_>>();
    top.sort_by(|a, b| b.orders_today.cmp(&a.orders_today));
    if !top.is_empty() {
        lines.push("Top dishes today:".to_string());
        lines.extend(top.iter().take(SUMMARY_LIST_LIMIT).map(|dish| {
            format!(
                "- {} ({}): {:.2}, {} orders today, {} this week, trend {}",
                dish.name,
                dish.category,
                dish.price,
                dish.orders_today,
                dish.orders_last_7_days,
                dish.trend
            )
        }));
    }

    let mut flagged = dataset
        .ingredients
        .iter()
        .filter(|ingredient| ingredient.risk_tier.needs_attention())
        .collect::<Vec<_>>();
    flagged.sort_by(|a, b| a.days_of_cover.total_cmp(&b.days_of_cover));
    lines.push(format!(
        "Inventory: {} ingredients tracked, {} at risk",
        dataset.ingredients.len(),
        flagged.len()
    ));
    lines.extend(flagged.iter().take(SUMMARY_LIST_LIMIT).map(|ingredient| {
        format!(
            "- {} [{}]: {} {} on hand, {:.1} days of cover, {:.0}% stockout risk",
            ingredient.name,
            ingredient.risk_tier,
            ingredient.current_inventory,
            ingredient.unit,
            ingredient.days_of_cover,
            ingredient.stockout_probability * 100.0
        )
    }));

    let supplier_names = dataset
        .suppliers
        .iter()
        .map(|supplier| supplier.name.as_str())
        .collect::<Vec<_>>();
    let suppliers = if supplier_names.is_empty() {
        "none on file".to_string()
    } else {
        supplier_names.join(", ")
    };
    lines.push(format!("Suppliers ({}): {suppliers}", supplier_names.len()));
    lines.join("\n")
}

/// Build the fixed system instruction for a conversation.
pub fn system_instruction(
    dataset: &RestaurantDataset,
    settings: &AssistantConfig,
    tools: &[ToolSpec],
) -> String {
    let name = settings
        .restaurant_name
        .as_deref()
        .unwrap_or(&dataset.restaurant.name);
    let mut sections = Vec::new();
    sections.push(format!(
        "You are the operations assistant for {name}. You help the owner and kitchen staff \
         with inventory, menu performance, suppliers and purchasing. Answer concisely and \
         use concrete numbers."
    ));
    sections.push(format!("## Current context\n\n{}", context_summary(dataset)));

    let mut capabilities = vec![
        "- Local tools that query live restaurant data (listed below).".to_string(),
        "- Photos: menu dishes, invoices or receipts, and shelf or stock photos.".to_string(),
    ];
    if settings.code_execution {
        capabilities
            .push("- Code execution for calculations, forecasts and tables.".to_string());
    }
    if settings.web_search {
        capabilities.push(
            "- Web search for market prices, food trends and supplier news; cite sources."
                .to_string(),
        );
    }
    sections.push(format!("## Capabilities\n\n{}", capabilities.join("\n")));

    let catalogue = tools
        .iter()
        .map(|tool| format!("- {}: {}", tool.name, tool.description))
        .collect::<Vec<_>>()
        .join("\n");
    sections.push(format!("## Tools\n\n{catalogue}"));

    sections.push(
        "## Rules\n\n\
         - Always call the relevant tool before answering questions about stock, dishes, \
         suppliers, sales or reorders. Never guess figures that a tool can provide.\n\
         - If a tool reports an error, explain what was not found and suggest a next step.\n\
         - Prefer several focused tool calls over assumptions."
            .to_string(),
    );
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_tools::ToolName;
    use serde_json::json;

    fn dataset() -> RestaurantDataset {
        RestaurantDataset::from_json_str(
            r#"{
                "restaurant": {"name": "Casa Verde", "cuisine": "Mexican"},
                "ingredients": [
                    {"name": "Avocado", "current_inventory": 3, "unit": "kg", "risk_tier": "CRITICAL",
                     "days_of_cover": 0.5, "stockout_probability": 0.9},
                    {"name": "Rice", "current_inventory": 40, "unit": "kg", "risk_tier": "SAFE"}
                ],
                "dishes": [
                    {"name": "Guacamole", "category": "Starters", "price": 9.5, "orders_today": 30,
                     "orders_last_7_days": 200, "trend": "rising", "popularity_rank": 1}
                ],
                "suppliers": []
            }"#,
        )
        .expect("dataset")
    }

    #[test]
    fn summary_mentions_risk_and_top_dishes() {
        let summary = context_summary(&dataset());
        assert!(summary.contains("Casa Verde (Mexican cuisine)"));
        assert!(summary.contains("Avocado [CRITICAL]"));
        assert!(!summary.contains("Rice ["));
        assert!(summary.contains("Guacamole (Starters): 9.50"));
        assert!(summary.contains("Suppliers (0): none on file"));
    }

    #[test]
    fn summary_is_one_line_per_entry_without_trailing_newline() {
        let summary = context_summary(&dataset());
        let lines = summary.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Restaurant: Casa Verde (Mexican cuisine)");
        assert_eq!(lines[2], "Top dishes today:");
        assert_eq!(lines[5], "- Avocado [CRITICAL]: 3 kg on hand, 0.5 days of cover, 90% stockout risk");
        assert_eq!(lines[6], "Suppliers (0): none on file");
        assert!(!summary.ends_with('\n'));
    }

    #[test]
    fn instruction_lists_tools_and_respects_capability_flags() {
        let tools = vec![ToolSpec {
            name: ToolName::CheckInventory,
            description: "stock lookup".to_string(),
            args_schema: json!({}),
        }];
        let settings = AssistantConfig {
            restaurant_name: Some("El Patio".to_string()),
            web_search: false,
            ..AssistantConfig::default()
        };
        let instruction = system_instruction(&dataset(), &settings, &tools);
        assert!(instruction.starts_with("You are the operations assistant for El Patio."));
        assert!(instruction.contains("- check_inventory: stock lookup"));
        assert!(instruction.contains("Code execution"));
        assert!(!instruction.contains("Web search"));
        assert!(instruction.contains("Always call the relevant tool"));
    }
}
