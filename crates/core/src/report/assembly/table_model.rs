//! Assembled report rows and the bundle returned to callers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dataset::{DateWindow, DayPair};

/// Tier-3 revenue and profit row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDailyRow {
    pub tier: String,
    pub revenue: DayPair<Decimal>,
    pub profit: DayPair<Decimal>,
}

/// High-variance offer row with its affiliate narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighVarianceOfferRow {
    pub offer_id: String,
    pub app_id: String,
    pub status: String,
    pub geo: String,
    pub advertiser: String,
    pub revenue: DayPair<Decimal>,
    pub delta: Decimal,
    pub percent_change: Decimal,
    /// "Old budget" or "New budget" label
    pub budget_type: String,
    /// Newline-joined affiliate sentences, or the no-change sentinel
    pub attribution: String,
}

/// Tier-2 reject row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRejectRow {
    pub tier: String,
    pub revenue: DayPair<Decimal>,
    pub profit: DayPair<Decimal>,
    pub conversions: DayPair<i64>,
    pub rejects: DayPair<i64>,
    pub reject_rate: DayPair<Decimal>,
}

/// Affiliate reject row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateRejectRow {
    pub affiliate: String,
    pub revenue: DayPair<Decimal>,
    pub profit: DayPair<Decimal>,
    pub conversions: DayPair<i64>,
    pub rejects: DayPair<i64>,
    pub reject_rate: DayPair<Decimal>,
    /// Tier-2 names the affiliate ran on across both days, ascending
    pub associated_tiers: Vec<String>,
}

/// Headline counts rendered above the tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub high_variance_offers: usize,
    pub old_budget_offers: usize,
    pub new_budget_offers: usize,
}

/// One fully assembled daily report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportBundle {
    pub window: DateWindow,
    pub tier_daily: Vec<TierDailyRow>,
    pub high_variance_offers: Vec<HighVarianceOfferRow>,
    pub tier_rejects: Vec<TierRejectRow>,
    pub affiliate_rejects: Vec<AffiliateRejectRow>,
    pub summary: ReportSummary,
    pub generated_at: DateTime<Utc>,
}
