//! Typed insight records and their response schemas.

use super::InsightKind;
use crate::error::InsightError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Number of records every insight kind returns.
pub const RECORD_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Risk,
    Opportunity,
    Info,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    Reprice,
    Promote,
    Discontinue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardInsight {
    pub title: String,
    pub description: String,
    pub severity: Level,
    #[serde(rename = "type")]
    pub kind: InsightType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardInsights {
    pub insights: [DashboardInsight; RECORD_COUNT],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSuggestion {
    pub dish_name: String,
    pub action: MenuAction,
    pub reason: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSuggestions {
    pub suggestions: [MenuSuggestion; RECORD_COUNT],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcurementRecommendation {
    pub action: String,
    pub details: String,
    pub savings_estimate: String,
    pub priority: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcurementPlan {
    pub recommendations: [ProcurementRecommendation; RECORD_COUNT],
}

/// A parsed insight of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightPayload {
    Dashboard(DashboardInsights),
    Menu(MenuSuggestions),
    Procurement(ProcurementPlan),
}

impl InsightPayload {
    /// Parse raw JSON against the fixed shape for `kind`. Wrong array
    /// lengths, unknown enum values and missing fields all fail.
    pub fn parse(kind: InsightKind, value: &Value) -> Result<Self, InsightError> {
        let schema_error = |err: serde_json::Error| InsightError::Schema {
            kind: kind.as_str(),
            message: err.to_string(),
        };
        let payload = match kind {
            InsightKind::Dashboard => InsightPayload::Dashboard(
                DashboardInsights::deserialize(value).map_err(schema_error)?,
            ),
            InsightKind::Menu => {
                InsightPayload::Menu(MenuSuggestions::deserialize(value).map_err(schema_error)?)
            }
            InsightKind::Procurement => InsightPayload::Procurement(
                ProcurementPlan::deserialize(value).map_err(schema_error)?,
            ),
        };
        Ok(payload)
    }

    pub fn kind(&self) -> InsightKind {
        match self {
            InsightPayload::Dashboard(_) => InsightKind::Dashboard,
            InsightPayload::Menu(_) => InsightKind::Menu,
            InsightPayload::Procurement(_) => InsightKind::Procurement,
        }
    }

    pub fn to_value(&self) -> Value {
        let value = match self {
            InsightPayload::Dashboard(inner) => serde_json::to_value(inner),
            InsightPayload::Menu(inner) => serde_json::to_value(inner),
            InsightPayload::Procurement(inner) => serde_json::to_value(inner),
        };
        value.unwrap_or(Value::Null)
    }
}

/// Response schema sent with the request for `kind`.
pub(crate) fn response_schema(kind: InsightKind) -> Value {
    let level = json!({"type": "string", "enum": ["low", "medium", "high"]});
    let (field, item) = match kind {
        InsightKind::Dashboard => (
            "insights",
            object(
                json!({
                    "title": {"type": "string"},
                    "description": {"type": "string"},
                    "severity": level,
                    "type": {"type": "string", "enum": ["risk", "opportunity", "info"]},
                }),
                &["title", "description", "severity", "type"],
            ),
        ),
        InsightKind::Menu => (
            "suggestions",
            object(
                json!({
                    "dish_name": {"type": "string"},
                    "action": {"type": "string", "enum": ["reprice", "promote", "discontinue"]},
                    "reason": {"type": "string"},
                    "detail": {"type": "string"},
                }),
                &["dish_name", "action", "reason", "detail"],
            ),
        ),
        InsightKind::Procurement => (
            "recommendations",
            object(
                json!({
                    "action": {"type": "string"},
                    "details": {"type": "string"},
                    "savings_estimate": {"type": "string"},
                    "priority": level,
                }),
                &["action", "details", "savings_estimate", "priority"],
            ),
        ),
    };
    object(
        json!({
            field: {
                "type": "array",
                "minItems": RECORD_COUNT,
                "maxItems": RECORD_COUNT,
                "items": item,
            }
        }),
        &[field],
    )
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
