//! Tier-level two-day aggregation.

use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;

use crate::dataset::{DateWindow, DayPair, PerformanceRecord, TierLookup};
use crate::utils::time_utils::calendar_day;

use super::{TierDailyMetrics, TierLevel};

/// Sums revenue, profit, and conversions per tier per report day.
///
/// Every tier value seen anywhere in the performance data gets a row, with
/// zeros on days it has no traffic; unmapped advertisers aggregate under the
/// empty tier. Rows come back ordered by tier name.
pub fn summarize_tiers(
    records: &[PerformanceRecord],
    lookup: &TierLookup,
    window: &DateWindow,
    level: TierLevel,
) -> Vec<TierDailyMetrics> {
    #[derive(Default)]
    struct TierScratch {
        revenue: DayPair<Decimal>,
        profit: DayPair<Decimal>,
        conversions: DayPair<i64>,
    }

    let mut sums: BTreeMap<String, TierScratch> = BTreeMap::new();
    for record in records {
        let tier = match level {
            TierLevel::Tier2 => lookup.tier2(&record.advertiser),
            TierLevel::Tier3 => lookup.tier3(&record.advertiser),
        };
        let entry = sums.entry(tier.to_string()).or_default();

        if let Some(day) = window.day_of(calendar_day(record.timestamp)) {
            *entry.revenue.get_mut(day) += record.total_revenue;
            *entry.profit.get_mut(day) += record.total_profit;
            *entry.conversions.get_mut(day) += record.total_conversions;
        }
    }

    debug!("Summarized {} {} values", sums.len(), level.as_str());
    sums.into_iter()
        .map(|(tier, scratch)| TierDailyMetrics {
            tier,
            revenue: scratch.revenue,
            profit: scratch.profit,
            conversions: scratch.conversions,
        })
        .collect()
}
