//! In-memory restaurant dataset queried by the tools.
//!
//! The dataset is read-only once loaded; tools and prompts only borrow it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Snapshot of one restaurant's operational data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantDataset {
    pub restaurant: RestaurantProfile,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantProfile {
    pub name: String,
    #[serde(default)]
    pub cuisine: String,
}

/// Stockout risk classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Critical,
    Urgent,
    Monitor,
    #[serde(alias = "OK")]
    Safe,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Critical => "CRITICAL",
            RiskTier::Urgent => "URGENT",
            RiskTier::Monitor => "MONITOR",
            RiskTier::Safe => "SAFE",
        }
    }

    /// Whether the tier belongs on the low-stock alert list.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, RiskTier::Safe)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub current_inventory: f64,
    pub unit: String,
    pub risk_tier: RiskTier,
    #[serde(default)]
    pub days_of_cover: f64,
    #[serde(default)]
    pub stockout_probability: f64,
    #[serde(default)]
    pub trend: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub orders_today: u32,
    #[serde(default)]
    pub orders_last_7_days: u32,
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub popularity_rank: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub name: String,
    /// Ingredients the supplier carries.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Unit price per item name.
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
    #[serde(default)]
    pub lead_time_days: u32,
    #[serde(default)]
    pub reliability_score: f64,
    #[serde(default)]
    pub shipping_cost: f64,
}

impl Supplier {
    /// Whether the supplier lists `term` among its ingredients or prices.
    pub fn carries(&self, term: &str) -> bool {
        self.ingredients.iter().any(|item| loosely_matches(item, term))
            || self.prices.keys().any(|item| loosely_matches(item, term))
    }

    /// Unit price for the first price entry matching `term`.
    pub fn unit_price(&self, term: &str) -> Option<f64> {
        self.prices
            .iter()
            .find(|(item, _)| loosely_matches(item, term))
            .map(|(_, price)| *price)
    }
}

impl RestaurantDataset {
    pub fn from_json_str(contents: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Identity used to key cached insights: the cuisine, or the restaurant
    /// name when no cuisine is set.
    pub fn context_key(&self) -> String {
        let key = if self.restaurant.cuisine.trim().is_empty() {
            &self.restaurant.name
        } else {
            &self.restaurant.cuisine
        };
        key.trim().to_lowercase()
    }

    /// First ingredient whose name contains `term`, ignoring case.
    pub fn find_ingredient(&self, term: &str) -> Option<&Ingredient> {
        let needle = term.to_lowercase();
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.name.to_lowercase().contains(&needle))
    }

    /// Dishes whose name or category contains `term`, ignoring case.
    pub fn search_dishes(&self, term: &str) -> Vec<&Dish> {
        let needle = term.to_lowercase();
        self.dishes
            .iter()
            .filter(|dish| {
                dish.name.to_lowercase().contains(&needle)
                    || dish.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Suppliers carrying `term`, in dataset order.
    pub fn suppliers_for(&self, term: &str) -> Vec<&Supplier> {
        self.suppliers
            .iter()
            .filter(|supplier| supplier.carries(term))
            .collect()
    }
}

/// Case-insensitive containment in either direction, so "olive oil" matches
/// "Olive Oil (Extra Virgin)" and vice versa.
fn loosely_matches(item: &str, term: &str) -> bool {
    let item = item.to_lowercase();
    let term = term.to_lowercase();
    !term.is_empty() && !item.is_empty() && (item.contains(&term) || term.contains(&item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DATASET: &str = r#"{
        "restaurant": {"name": "Trattoria Uno", "cuisine": "Italian"},
        "ingredients": [
            {"name": "Olive Oil (Extra Virgin)", "current_inventory": 12, "unit": "liters",
             "risk_tier": "URGENT", "days_of_cover": 2.5, "stockout_probability": 0.4, "trend": "down"},
            {"name": "Basil", "current_inventory": 1, "unit": "kg", "risk_tier": "OK"}
        ],
        "dishes": [],
        "suppliers": [
            {"name": "Oliva Bros", "ingredients": ["Olive Oil"], "prices": {"Olive Oil": 18.5},
             "lead_time_days": 2, "reliability_score": 0.9, "shipping_cost": 15}
        ]
    }"#;

    #[test]
    fn parses_dataset_and_accepts_ok_alias() {
        let dataset = RestaurantDataset::from_json_str(DATASET).expect("dataset");
        assert_eq!(dataset.ingredients[1].risk_tier, RiskTier::Safe);
        assert!(!dataset.ingredients[1].risk_tier.needs_attention());
        assert_eq!(dataset.context_key(), "italian");
    }

    #[test]
    fn ingredient_lookup_is_case_insensitive_substring() {
        let dataset = RestaurantDataset::from_json_str(DATASET).expect("dataset");
        let found = dataset.find_ingredient("olive OIL").expect("match");
        assert_eq!(found.name, "Olive Oil (Extra Virgin)");
        assert!(dataset.find_ingredient("saffron").is_none());
    }

    #[test]
    fn supplier_matching_works_in_both_directions() {
        let dataset = RestaurantDataset::from_json_str(DATASET).expect("dataset");
        assert_eq!(dataset.suppliers_for("olive").len(), 1);
        assert_eq!(dataset.suppliers_for("Olive Oil (Extra Virgin)").len(), 1);
        assert_eq!(dataset.suppliers[0].unit_price("olive oil"), Some(18.5));
        assert!(dataset.suppliers_for("").is_empty());
    }

    #[test]
    fn context_key_falls_back_to_name() {
        let mut dataset = RestaurantDataset::from_json_str(DATASET).expect("dataset");
        dataset.restaurant.cuisine = String::new();
        assert_eq!(dataset.context_key(), "trattoria uno");
    }
}
