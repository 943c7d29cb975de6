//! Schema-constrained structured insights for dashboard widgets.
//!
//! Each [`InsightKind`] asks one fixed question about the dataset and
//! expects a JSON object holding exactly three typed records. Results are
//! cached per `(kind, context key)` until explicitly refreshed.

mod cache;
mod generator;
mod records;

pub use cache::InsightCache;
pub use generator::{InsightGenerator, InsightState};
pub use records::{
    DashboardInsight, DashboardInsights, InsightPayload, InsightType, Level, MenuAction,
    MenuSuggestion, MenuSuggestions, ProcurementPlan, ProcurementRecommendation,
};

use crate::error::InsightError;
use std::fmt;
use std::str::FromStr;

/// The three fixed insight questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    /// Operational risk and opportunity digest.
    Dashboard,
    /// Reprice, promote or discontinue suggestions.
    Menu,
    /// Purchasing recommendations.
    Procurement,
}

impl InsightKind {
    pub const ALL: [InsightKind; 3] = [
        InsightKind::Dashboard,
        InsightKind::Menu,
        InsightKind::Procurement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Dashboard => "dashboard",
            InsightKind::Menu => "menu",
            InsightKind::Procurement => "procurement",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = InsightError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        InsightKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| InsightError::UnknownKind(value.trim().to_string()))
    }
}
