//! Reject counting, rates, and affiliate apportionment.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DAY_SHIFT_ADVERTISER_TOKEN;
use crate::dataset::{
    DateWindow, DayPair, PerformanceRecord, RejectEvent, RejectRuleSet, TierLookup,
};
use crate::report::tiers::TierDailyMetrics;
use crate::utils::time_utils::{calendar_day, shifted_calendar_day};

use super::{AffiliateRejectMetrics, TierRejectMetrics};

/// Rejected share of attempted conversions, percent.
///
/// Attempts are approved conversions plus rejects; a day with neither
/// reports zero.
pub fn reject_rate(rejects: i64, conversions: i64) -> Decimal {
    let attempts = conversions + rejects;
    if attempts > 0 {
        Decimal::from(rejects) / Decimal::from(attempts) * dec!(100)
    } else {
        Decimal::ZERO
    }
}

/// Day a reject event attributes to.
///
/// Advertisers whose name contains the day-shift token report a day late;
/// their timestamps are shifted back one day before truncation.
fn event_attribution_day(event: &RejectEvent) -> NaiveDate {
    if event
        .advertiser
        .to_lowercase()
        .contains(DAY_SHIFT_ADVERTISER_TOKEN)
    {
        shifted_calendar_day(event.timestamp, 1)
    } else {
        calendar_day(event.timestamp)
    }
}

/// Counts reject events per tier-2 value per report day.
///
/// Each event is classified through the rule set (no matching rule means
/// non-reject) and enriched with its advertiser's tier-2 value; unmapped
/// advertisers count under the empty tier. Events landing outside the window
/// are dropped.
pub fn count_tier_rejects(
    events: &[RejectEvent],
    rules: &RejectRuleSet,
    lookup: &TierLookup,
    window: &DateWindow,
) -> HashMap<String, DayPair<i64>> {
    let mut counts: HashMap<String, DayPair<i64>> = HashMap::new();
    let mut rejected = 0usize;
    for event in events {
        if !rules.is_reject(&event.event) {
            continue;
        }
        let Some(day) = window.day_of(event_attribution_day(event)) else {
            continue;
        };
        let tier = lookup.tier2(&event.advertiser).to_string();
        *counts.entry(tier).or_default().get_mut(day) += 1;
        rejected += 1;
    }

    debug!(
        "Counted {} reject events across {} tiers",
        rejected,
        counts.len()
    );
    counts
}

/// Joins tier-level reject counts against the tier-2 traffic summary.
///
/// The tier universe is the summary's: event tiers with no performance
/// traffic do not produce rows.
pub fn tier_reject_metrics(
    tier_metrics: &[TierDailyMetrics],
    counts: &HashMap<String, DayPair<i64>>,
) -> Vec<TierRejectMetrics> {
    tier_metrics
        .iter()
        .map(|metrics| {
            let rejects = counts.get(&metrics.tier).copied().unwrap_or_default();
            TierRejectMetrics {
                tier: metrics.tier.clone(),
                revenue: metrics.revenue,
                profit: metrics.profit,
                conversions: metrics.conversions,
                rejects,
                reject_rate: DayPair::new(
                    reject_rate(rejects.newest, metrics.conversions.newest),
                    reject_rate(rejects.second_newest, metrics.conversions.second_newest),
                ),
            }
        })
        .collect()
}

/// Per-affiliate reject exposure.
///
/// Every affiliate present anywhere in the performance data gets a row,
/// ordered by name. The affiliate's tier association for a day is the most
/// frequent mapped tier-2 among its records that day (ties resolve to the
/// lexicographically smallest); the union of the two days' associations
/// decides which tier-level counts it absorbs.
pub fn affiliate_reject_metrics(
    records: &[PerformanceRecord],
    lookup: &TierLookup,
    window: &DateWindow,
    counts: &HashMap<String, DayPair<i64>>,
) -> Vec<AffiliateRejectMetrics> {
    #[derive(Default)]
    struct AffiliateScratch {
        revenue: DayPair<Decimal>,
        profit: DayPair<Decimal>,
        conversions: DayPair<i64>,
        tier_counts: DayPair<BTreeMap<String, usize>>,
    }

    let mut sums: BTreeMap<String, AffiliateScratch> = BTreeMap::new();
    for record in records {
        let entry = sums.entry(record.affiliate.clone()).or_default();

        let Some(day) = window.day_of(calendar_day(record.timestamp)) else {
            continue;
        };
        *entry.revenue.get_mut(day) += record.total_revenue;
        *entry.profit.get_mut(day) += record.total_profit;
        *entry.conversions.get_mut(day) += record.total_conversions;

        let tier = lookup.tier2(&record.advertiser);
        if !tier.is_empty() {
            *entry
                .tier_counts
                .get_mut(day)
                .entry(tier.to_string())
                .or_insert(0) += 1;
        }
    }

    sums.into_iter()
        .map(|(affiliate, scratch)| {
            let associated_tiers: BTreeSet<String> = [
                tier_mode(&scratch.tier_counts.newest),
                tier_mode(&scratch.tier_counts.second_newest),
            ]
            .into_iter()
            .flatten()
            .collect();

            let rejects = DayPair::new(
                associated_rejects(&associated_tiers, counts, |pair| pair.newest),
                associated_rejects(&associated_tiers, counts, |pair| pair.second_newest),
            );
            AffiliateRejectMetrics {
                affiliate,
                revenue: scratch.revenue,
                profit: scratch.profit,
                reject_rate: DayPair::new(
                    reject_rate(rejects.newest, scratch.conversions.newest),
                    reject_rate(rejects.second_newest, scratch.conversions.second_newest),
                ),
                conversions: scratch.conversions,
                associated_tiers: associated_tiers.into_iter().collect(),
                rejects,
            }
        })
        .collect()
}

/// Most frequent tier in a day's counts; ties resolve to the smallest name.
fn tier_mode(day_counts: &BTreeMap<String, usize>) -> Option<String> {
    day_counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(tier, _)| tier.clone())
}

fn associated_rejects(
    tiers: &BTreeSet<String>,
    counts: &HashMap<String, DayPair<i64>>,
    day: impl Fn(&DayPair<i64>) -> i64,
) -> i64 {
    tiers
        .iter()
        .filter_map(|tier| counts.get(tier))
        .map(day)
        .sum()
}
