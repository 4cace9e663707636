//! Affiliate attribution model types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dataset::DayPair;

/// Two-day movement of one affiliate inside one offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateDelta {
    pub offer_id: String,
    pub affiliate: String,
    pub revenue: DayPair<Decimal>,
    pub clicks: DayPair<i64>,
    pub conversions: DayPair<i64>,
    /// Newest-day revenue minus second-newest-day revenue
    pub revenue_diff: Decimal,
    pub clicks_diff: i64,
    /// Guarded percent change of clicks
    pub clicks_change_pct: Decimal,
    /// Conversions per hundred clicks, per day; zero on a clickless day
    pub conversion_rate: DayPair<Decimal>,
    /// Newest minus second-newest conversion rate, percentage points
    pub cr_change_abs: Decimal,
}

/// Attribution of one high-variance offer's movement to its affiliates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferAttribution {
    pub offer_id: String,
    /// Significant movers, descending revenue diff
    pub contributors: Vec<AffiliateDelta>,
    /// One line per contributor, newline-joined for the report cell
    pub summary: String,
}
