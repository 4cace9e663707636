//! Affiliate-level movement attribution.

use std::collections::{HashMap, HashSet};

use log::debug;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::{AFFILIATE_DELTA_THRESHOLD, ZERO_BASE_CHANGE_PCT};
use crate::dataset::{DateWindow, DayPair, PerformanceRecord};
use crate::report::offers::percent_change;
use crate::utils::time_utils::calendar_day;

use super::{AffiliateDelta, OfferAttribution};

/// Attributes each high-variance offer's revenue movement to its affiliates.
///
/// Offers are mutually independent, so they are sharded across threads; the
/// result is keyed by offer id and does not depend on scheduling. Offers
/// outside the high-variance set are not analyzed at all.
pub fn attribute_affiliates(
    records: &[PerformanceRecord],
    window: &DateWindow,
    high_variance: &HashSet<String>,
) -> HashMap<String, OfferAttribution> {
    let mut per_offer: HashMap<&str, Vec<&PerformanceRecord>> = HashMap::new();
    for record in records {
        if !high_variance.contains(record.offer_id.as_str()) {
            continue;
        }
        per_offer
            .entry(record.offer_id.as_str())
            .or_default()
            .push(record);
    }

    let attributions: HashMap<String, OfferAttribution> = per_offer
        .into_par_iter()
        .map(|(offer_id, rows)| {
            (
                offer_id.to_string(),
                attribute_offer(offer_id, &rows, window),
            )
        })
        .collect();

    debug!(
        "Attributed {} of {} high-variance offers",
        attributions.len(),
        high_variance.len()
    );
    attributions
}

/// Builds one offer's attribution: per-affiliate two-day sums, the
/// significance filter, deterministic ordering, and the joined narration.
fn attribute_offer(
    offer_id: &str,
    rows: &[&PerformanceRecord],
    window: &DateWindow,
) -> OfferAttribution {
    #[derive(Default)]
    struct AffiliateScratch {
        revenue: DayPair<Decimal>,
        clicks: DayPair<i64>,
        conversions: DayPair<i64>,
    }

    let mut sums: HashMap<String, AffiliateScratch> = HashMap::new();
    for record in rows {
        let Some(day) = window.day_of(calendar_day(record.timestamp)) else {
            continue;
        };
        let entry = sums.entry(record.affiliate.clone()).or_default();
        *entry.revenue.get_mut(day) += record.total_revenue;
        *entry.clicks.get_mut(day) += record.total_clicks;
        *entry.conversions.get_mut(day) += record.total_conversions;
    }

    let mut contributors: Vec<AffiliateDelta> = sums
        .into_iter()
        .map(|(affiliate, scratch)| {
            build_delta(
                offer_id,
                affiliate,
                scratch.revenue,
                scratch.clicks,
                scratch.conversions,
            )
        })
        .filter(|delta| delta.revenue_diff.abs() >= AFFILIATE_DELTA_THRESHOLD)
        .collect();

    // Largest gains first; ties by name so reruns render identically.
    contributors.sort_by(|a, b| {
        b.revenue_diff
            .cmp(&a.revenue_diff)
            .then_with(|| a.affiliate.cmp(&b.affiliate))
    });

    let summary = contributors
        .iter()
        .map(attribution_sentence)
        .collect::<Vec<_>>()
        .join("\n");

    OfferAttribution {
        offer_id: offer_id.to_string(),
        contributors,
        summary,
    }
}

fn build_delta(
    offer_id: &str,
    affiliate: String,
    revenue: DayPair<Decimal>,
    clicks: DayPair<i64>,
    conversions: DayPair<i64>,
) -> AffiliateDelta {
    let conversion_rates = DayPair::new(
        conversion_rate(conversions.newest, clicks.newest),
        conversion_rate(conversions.second_newest, clicks.second_newest),
    );
    AffiliateDelta {
        offer_id: offer_id.to_string(),
        affiliate,
        revenue_diff: revenue.newest - revenue.second_newest,
        clicks_diff: clicks.newest - clicks.second_newest,
        clicks_change_pct: percent_change(
            Decimal::from(clicks.newest),
            Decimal::from(clicks.second_newest),
        ),
        cr_change_abs: conversion_rates.newest - conversion_rates.second_newest,
        conversion_rate: conversion_rates,
        revenue,
        clicks,
        conversions,
    }
}

/// Conversions per hundred clicks, zero when the day had no clicks.
pub fn conversion_rate(conversions: i64, clicks: i64) -> Decimal {
    if clicks > 0 {
        Decimal::from(conversions) / Decimal::from(clicks) * dec!(100)
    } else {
        Decimal::ZERO
    }
}

/// Renders one affiliate movement as a report line.
///
/// Three shapes: revenue appearing from nothing, revenue stopping entirely,
/// and a plain movement with its relative change plus the clicks and
/// conversion-rate shifts behind it. The relative change falls back to the
/// signed spike sentinel when the baseline day had zero revenue.
pub fn attribution_sentence(delta: &AffiliateDelta) -> String {
    let newest = delta.revenue.newest;
    let second = delta.revenue.second_newest;

    if newest > Decimal::ZERO && second.is_zero() {
        return format!(
            "{} newly generated {:.2} USD",
            delta.affiliate,
            newest.round_dp(2)
        );
    }
    if newest.is_zero() && second > Decimal::ZERO {
        return format!(
            "{} stopped generating revenue, losing {:.2} USD",
            delta.affiliate,
            second.round_dp(2)
        );
    }

    let pct = if second.is_zero() {
        if delta.revenue_diff > Decimal::ZERO {
            ZERO_BASE_CHANGE_PCT
        } else {
            -ZERO_BASE_CHANGE_PCT
        }
    } else {
        delta.revenue_diff / second.abs() * dec!(100)
    };
    let revenue_verb = if delta.revenue_diff > Decimal::ZERO {
        "gained"
    } else {
        "lost"
    };
    let clicks_direction = if delta.clicks_change_pct > Decimal::ZERO {
        "up"
    } else {
        "down"
    };
    let cr_direction = if delta.cr_change_abs > Decimal::ZERO {
        "up"
    } else {
        "down"
    };

    // Round before formatting; the precision specifier then only pads.
    format!(
        "{} {} {:.2} USD ({:.1}%), clicks {} {:.1}%, CR {} {:.1}pp",
        delta.affiliate,
        revenue_verb,
        delta.revenue_diff.abs().round_dp(2),
        pct.abs().round_dp(1),
        clicks_direction,
        delta.clicks_change_pct.abs().round_dp(1),
        cr_direction,
        delta.cr_change_abs.abs().round_dp(1),
    )
}
