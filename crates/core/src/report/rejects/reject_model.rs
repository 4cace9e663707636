//! Reject analytics model types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dataset::DayPair;

/// Reject counts and rates for one tier-2 value, joined with the tier's
/// two-day traffic sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRejectMetrics {
    pub tier: String,
    pub revenue: DayPair<Decimal>,
    pub profit: DayPair<Decimal>,
    pub conversions: DayPair<i64>,
    pub rejects: DayPair<i64>,
    /// Rejects over conversions-plus-rejects, percent
    pub reject_rate: DayPair<Decimal>,
}

/// Reject exposure of one affiliate.
///
/// An affiliate's per-day reject count is the sum of the tier-level counts
/// of every tier in its association union, so affiliates sharing a tier each
/// absorb that tier's full count. The rate divides by the affiliate's own
/// conversions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateRejectMetrics {
    pub affiliate: String,
    pub revenue: DayPair<Decimal>,
    pub profit: DayPair<Decimal>,
    pub conversions: DayPair<i64>,
    /// Union of the affiliate's per-day dominant tiers, sorted
    pub associated_tiers: Vec<String>,
    pub rejects: DayPair<i64>,
    pub reject_rate: DayPair<Decimal>,
}
