//! Advertiser-tier model types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dataset::DayPair;

/// Tier granularity of the advertiser map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierLevel {
    Tier2,
    Tier3,
}

impl TierLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierLevel::Tier2 => "tier2",
            TierLevel::Tier3 => "tier3",
        }
    }
}

/// Two-day traffic sums for one advertiser tier.
///
/// The empty tier collects advertisers missing from the tier map. The tier-3
/// report renders revenue and profit only; conversions are carried for the
/// tier-2 variant, which reject rates divide by.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDailyMetrics {
    pub tier: String,
    pub revenue: DayPair<Decimal>,
    pub profit: DayPair<Decimal>,
    pub conversions: DayPair<i64>,
}
