use brigade_tools::RestaurantDataset;
use serde_json::json;

/// Small Italian restaurant used across tests.
///
/// Notable facts: "Olive Oil (Extra Virgin)" has 12 liters and is quoted at
/// 18.50 by the most reliable olive oil supplier; "Margherita Pizza" is the
/// only pizza; Basil has a supplier with no price; Saffron has no supplier.
pub fn sample_dataset() -> RestaurantDataset {
    let value = json!({
        "restaurant": {"name": "Trattoria Brigata", "cuisine": "Italian"},
        "ingredients": [
            {"name": "Olive Oil (Extra Virgin)", "current_inventory": 12.0, "unit": "liters",
             "risk_tier": "URGENT", "days_of_cover": 2.5, "stockout_probability": 0.45, "trend": "rising"},
            {"name": "Mozzarella", "current_inventory": 4.0, "unit": "kg",
             "risk_tier": "CRITICAL", "days_of_cover": 0.8, "stockout_probability": 0.82, "trend": "rising"},
            {"name": "Basil", "current_inventory": 1.5, "unit": "kg",
             "risk_tier": "MONITOR", "days_of_cover": 4.0, "stockout_probability": 0.2, "trend": "stable"},
            {"name": "Flour (00)", "current_inventory": 60.0, "unit": "kg",
             "risk_tier": "SAFE", "days_of_cover": 14.0, "stockout_probability": 0.02, "trend": "stable"},
            {"name": "San Marzano Tomatoes", "current_inventory": 20.0, "unit": "cans",
             "risk_tier": "SAFE", "days_of_cover": 9.0, "stockout_probability": 0.05, "trend": "stable"},
            {"name": "Saffron", "current_inventory": 0.05, "unit": "kg",
             "risk_tier": "MONITOR", "days_of_cover": 6.0, "stockout_probability": 0.1, "trend": "falling"},
            {"name": "Guanciale", "current_inventory": 3.0, "unit": "kg",
             "risk_tier": "CRITICAL", "days_of_cover": 1.2, "stockout_probability": 0.7, "trend": "rising"}
        ],
        "dishes": [
            {"name": "Margherita Pizza", "category": "Pizza", "price": 14.0, "orders_today": 42,
             "orders_last_7_days": 260, "trend": "rising", "popularity_rank": 1},
            {"name": "Spaghetti Carbonara", "category": "Pasta", "price": 16.5, "orders_today": 35,
             "orders_last_7_days": 230, "trend": "stable", "popularity_rank": 2},
            {"name": "Lasagna alla Bolognese", "category": "Pasta", "price": 18.0, "orders_today": 20,
             "orders_last_7_days": 150, "trend": "stable", "popularity_rank": 4},
            {"name": "Penne all'Arrabbiata", "category": "Pasta", "price": 13.0, "orders_today": 12,
             "orders_last_7_days": 95, "trend": "falling", "popularity_rank": 7},
            {"name": "Risotto ai Funghi", "category": "Risotto", "price": 19.0, "orders_today": 15,
             "orders_last_7_days": 110, "trend": "rising", "popularity_rank": 5},
            {"name": "Caprese Salad", "category": "Antipasti", "price": 11.0, "orders_today": 25,
             "orders_last_7_days": 160, "trend": "rising", "popularity_rank": 3},
            {"name": "Bruschetta", "category": "Antipasti", "price": 8.5, "orders_today": 18,
             "orders_last_7_days": 120, "trend": "stable", "popularity_rank": 6},
            {"name": "Tiramisu", "category": "Dessert", "price": 9.0, "orders_today": 10,
             "orders_last_7_days": 85, "trend": "stable", "popularity_rank": 8},
            {"name": "Panna Cotta", "category": "Dessert", "price": 8.0, "orders_today": 4,
             "orders_last_7_days": 30, "trend": "falling", "popularity_rank": 10},
            {"name": "Gnocchi al Pesto", "category": "Pasta", "price": 15.0, "orders_today": 8,
             "orders_last_7_days": 70, "trend": "falling", "popularity_rank": 9}
        ],
        "suppliers": [
            {"name": "Oliva Bros", "ingredients": ["Olive Oil"], "prices": {"Olive Oil": 18.5},
             "lead_time_days": 2, "reliability_score": 0.92, "shipping_cost": 15.0},
            {"name": "Metro Wholesale", "ingredients": ["Olive Oil", "Flour", "San Marzano Tomatoes"],
             "prices": {"Olive Oil": 16.0, "Flour": 1.2, "San Marzano Tomatoes": 2.75},
             "lead_time_days": 1, "reliability_score": 0.85, "shipping_cost": 25.0},
            {"name": "Caseificio Verde", "ingredients": ["Mozzarella"], "prices": {"Mozzarella": 9.5},
             "lead_time_days": 1, "reliability_score": 0.97, "shipping_cost": 10.0},
            {"name": "Green Garden", "ingredients": ["Basil"], "prices": {},
             "lead_time_days": 3, "reliability_score": 0.9, "shipping_cost": 8.0}
        ]
    });
    match serde_json::from_value(value) {
        Ok(dataset) => dataset,
        Err(err) => panic!("sample dataset is invalid: {err}"),
    }
}
