//! Offer-level model types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::OFFER_DELTA_THRESHOLD;
use crate::dataset::DayPair;

/// Budget age of an offer relative to the report window.
///
/// "Old budget" offers were already spending in the days before the newest
/// day; "new budget" offers first produced revenue on the newest day (or not
/// at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    Old,
    New,
}

impl BudgetType {
    /// Label rendered in the offer report.
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetType::Old => "Old budget",
            BudgetType::New => "New budget",
        }
    }
}

/// Per-offer two-day revenue aggregate.
///
/// Created once per run by the aggregator and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSummary {
    pub offer_id: String,
    /// App the offer promotes; empty when the source rows carry none
    pub app_id: String,
    /// Offer status on the newest day, "Unknown" without a newest-day row
    pub status: String,
    pub geo: String,
    pub advertiser: String,
    pub revenue: DayPair<Decimal>,
    /// Newest-day revenue minus second-newest-day revenue
    pub delta: Decimal,
    /// Guarded percent change; a zero baseline reports the 1000 spike
    /// sentinel (positive newest revenue) or 0
    pub percent_change: Decimal,
    pub budget_type: BudgetType,
}

impl OfferSummary {
    /// Whether the revenue movement clears the high-variance threshold.
    pub fn is_high_variance(&self) -> bool {
        self.delta.abs() >= OFFER_DELTA_THRESHOLD
    }
}
