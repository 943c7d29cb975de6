use brigade_test_utils::sample_dataset;
use brigade_tools::{ToolDispatcher, builtin_tool_registry};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn dispatcher() -> ToolDispatcher {
    ToolDispatcher::new(builtin_tool_registry().expect("registry"))
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object args")
}

#[test]
fn unknown_tool_returns_error_payload() {
    let dataset = sample_dataset();
    for name in ["bake_bread", "", "CHECK_INVENTORY"] {
        let result = dispatcher().execute(name, &Map::new(), &dataset);
        assert_eq!(result.name, name);
        assert_eq!(
            result.result,
            json!({"error": format!("unknown function: {name}")})
        );
    }
}

#[test]
fn check_inventory_matches_substring_case_insensitively() {
    let dataset = sample_dataset();
    let result = dispatcher().execute(
        "check_inventory",
        &args(json!({"ingredient_name": "OLIVE"})),
        &dataset,
    );
    assert_eq!(
        result.result,
        json!({
            "name": "Olive Oil (Extra Virgin)",
            "current_inventory": 12.0,
            "unit": "liters",
            "risk_tier": "URGENT",
            "days_of_cover": 2.5,
            "stockout_probability": 0.45,
            "trend": "rising",
        })
    );
}

#[test]
fn ingredient_lookups_report_misses_as_errors() {
    let dataset = sample_dataset();
    for tool in ["check_inventory", "get_supplier_info", "create_reorder_suggestion"] {
        let result = dispatcher().execute(
            tool,
            &args(json!({"ingredient_name": "dragonfruit"})),
            &dataset,
        );
        assert!(result.is_error(), "{tool} should report a miss");
        assert!(
            result
                .error_message()
                .expect("message")
                .contains("dragonfruit")
        );
    }
}

#[test]
fn missing_or_blank_arguments_are_invalid() {
    let dataset = sample_dataset();
    let missing = dispatcher().execute("check_inventory", &Map::new(), &dataset);
    assert!(
        missing
            .error_message()
            .expect("message")
            .starts_with("invalid arguments:")
    );

    let blank = dispatcher().execute("search_menu", &args(json!({"query": "  "})), &dataset);
    assert_eq!(
        blank.error_message(),
        Some("invalid arguments: query must not be empty")
    );
}

#[test]
fn search_menu_finds_single_pizza() {
    let dataset = sample_dataset();
    let result = dispatcher().execute("search_menu", &args(json!({"query": "pizza"})), &dataset);
    assert_eq!(result.result["total_matches"], json!(1));
    let results = result.result["results"].as_array().expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], json!("Margherita Pizza"));
    assert_eq!(results[0]["price"], json!(14.0));
    assert_eq!(results[0]["popularity_rank"], json!(1));
}

#[test]
fn search_menu_truncates_to_eight_and_reports_total() {
    let dataset = sample_dataset();
    let result = dispatcher().execute("search_menu", &args(json!({"query": "a"})), &dataset);
    assert_eq!(result.result["total_matches"], json!(10));
    assert_eq!(result.result["results"].as_array().expect("results").len(), 8);
}

#[test]
fn search_menu_matches_category() {
    let dataset = sample_dataset();
    let result = dispatcher().execute("search_menu", &args(json!({"query": "dessert"})), &dataset);
    let names = result.result["results"]
        .as_array()
        .expect("results")
        .iter()
        .map(|dish| dish["name"].as_str().expect("name").to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Tiramisu", "Panna Cotta"]);
}

#[test]
fn supplier_info_lists_prices_per_supplier() {
    let dataset = sample_dataset();
    let result = dispatcher().execute(
        "get_supplier_info",
        &args(json!({"ingredient_name": "olive oil"})),
        &dataset,
    );
    assert_eq!(
        result.result["suppliers"],
        json!([
            {"supplier": "Oliva Bros", "lead_time_days": 2, "reliability_score": 0.92,
             "shipping_cost": 15.0, "unit_price": 18.5},
            {"supplier": "Metro Wholesale", "lead_time_days": 1, "reliability_score": 0.85,
             "shipping_cost": 25.0, "unit_price": 16.0}
        ])
    );
}

#[test]
fn supplier_without_price_reports_null_unit_price() {
    let dataset = sample_dataset();
    let result = dispatcher().execute(
        "get_supplier_info",
        &args(json!({"ingredient_name": "basil"})),
        &dataset,
    );
    assert_eq!(result.result["suppliers"][0]["unit_price"], Value::Null);
}

#[test]
fn daily_stats_roll_up_orders_revenue_and_risk() {
    let dataset = sample_dataset();
    let result = dispatcher().execute("get_daily_stats", &Map::new(), &dataset);
    assert_eq!(
        result.result,
        json!({
            "total_orders_today": 189,
            "total_orders_last_7_days": 1310,
            "estimated_revenue_today": "1953.50",
            "top_dishes": [
                "Margherita Pizza",
                "Spaghetti Carbonara",
                "Caprese Salad",
                "Lasagna alla Bolognese",
                "Bruschetta"
            ],
            "critical_ingredients": 2,
            "urgent_ingredients": 1,
        })
    );
}

#[test]
fn low_stock_alerts_sorted_by_days_of_cover() {
    let dataset = sample_dataset();
    let result = dispatcher().execute("get_low_stock_alerts", &Map::new(), &dataset);
    assert_eq!(result.result["count"], json!(5));
    let names = result.result["alerts"]
        .as_array()
        .expect("alerts")
        .iter()
        .map(|alert| alert["name"].as_str().expect("name").to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "Mozzarella",
            "Guanciale",
            "Olive Oil (Extra Virgin)",
            "Basil",
            "Saffron"
        ]
    );
}

#[test]
fn reorder_suggestion_for_olive_oil() {
    let dataset = sample_dataset();
    let result = dispatcher().execute(
        "create_reorder_suggestion",
        &args(json!({"ingredient_name": "olive oil"})),
        &dataset,
    );
    assert_eq!(result.result["suggested_quantity"], json!(24));
    assert_eq!(result.result["estimated_cost"], json!("444.00"));
    assert_eq!(result.result["supplier"], json!("Oliva Bros"));
    assert_eq!(result.result["cost_available"], json!(true));
}

#[test]
fn reorder_without_price_marks_cost_unavailable() {
    let dataset = sample_dataset();
    let basil = dispatcher().execute(
        "create_reorder_suggestion",
        &args(json!({"ingredient_name": "basil"})),
        &dataset,
    );
    assert_eq!(basil.result["suggested_quantity"], json!(3));
    assert_eq!(basil.result["supplier"], json!("Green Garden"));
    assert_eq!(basil.result["estimated_cost"], json!("unavailable"));
    assert_eq!(basil.result["cost_available"], json!(false));

    let saffron = dispatcher().execute(
        "create_reorder_suggestion",
        &args(json!({"ingredient_name": "saffron"})),
        &dataset,
    );
    assert_eq!(saffron.result["suggested_quantity"], json!(1));
    assert_eq!(saffron.result["supplier"], Value::Null);
    assert_eq!(saffron.result["estimated_cost"], json!("unavailable"));
}

#[test]
fn reorder_quantity_is_ceiling_of_double_stock_for_every_ingredient() {
    let dataset = sample_dataset();
    for ingredient in &dataset.ingredients {
        let result = dispatcher().execute(
            "create_reorder_suggestion",
            &args(json!({"ingredient_name": ingredient.name})),
            &dataset,
        );
        let expected = (ingredient.current_inventory * 2.0).ceil() as u64;
        assert_eq!(result.result["suggested_quantity"], json!(expected));
    }
}

#[test]
fn dataset_is_untouched_by_dispatch() {
    let dataset = sample_dataset();
    let before = dataset.clone();
    let dispatcher = dispatcher();
    for spec in dispatcher.registry().specs() {
        let _ = dispatcher.execute(
            spec.name.as_str(),
            &args(json!({"ingredient_name": "olive"})),
            &dataset,
        );
    }
    assert_eq!(dataset, before);
}
