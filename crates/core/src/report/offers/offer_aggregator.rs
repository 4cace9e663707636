//! Per-offer two-day revenue aggregation.

use std::collections::{HashMap, HashSet};

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::{UNKNOWN_STATUS, ZERO_BASE_CHANGE_PCT};
use crate::dataset::{DateWindow, DayPair, PerformanceRecord, ReportDay};
use crate::utils::time_utils::calendar_day;

use super::{BudgetClassification, OfferSummary};

/// Full aggregation output: every offer in first-appearance order plus the
/// ids whose revenue moved by at least the high-variance threshold.
#[derive(Debug, Clone, Default)]
pub struct OfferAggregation {
    pub offers: Vec<OfferSummary>,
    pub high_variance: HashSet<String>,
}

/// Day-over-day percent change with the zero-baseline guard.
///
/// A zero baseline cannot anchor a ratio: the change reports the 1000 spike
/// sentinel when the current value is positive and 0 otherwise. Non-zero
/// baselines divide by their absolute value so a negative baseline keeps the
/// sign of the movement.
pub fn percent_change(current: Decimal, baseline: Decimal) -> Decimal {
    if baseline.is_zero() {
        if current > Decimal::ZERO {
            ZERO_BASE_CHANGE_PCT
        } else {
            Decimal::ZERO
        }
    } else {
        (current - baseline) / baseline.abs() * dec!(100)
    }
}

/// Aggregates per-offer revenue over the report window.
///
/// Offers keep the order of their first appearance in the input; a day with
/// no records for an offer contributes zero. Identity fields come from the
/// offer's first record, except `status`, which reflects the first record on
/// the newest day (or "Unknown" when there is none).
pub fn aggregate_offers(
    records: &[PerformanceRecord],
    window: &DateWindow,
    budgets: &BudgetClassification,
) -> OfferAggregation {
    struct OfferScratch {
        app_id: String,
        geo: String,
        advertiser: String,
        newest_status: Option<String>,
        revenue: DayPair<Decimal>,
    }

    let mut order: Vec<String> = Vec::new();
    let mut scratch: HashMap<String, OfferScratch> = HashMap::new();

    for record in records {
        let entry = scratch
            .entry(record.offer_id.clone())
            .or_insert_with(|| {
                order.push(record.offer_id.clone());
                OfferScratch {
                    app_id: record.app_id.clone(),
                    geo: record.geo.clone(),
                    advertiser: record.advertiser.clone(),
                    newest_status: None,
                    revenue: DayPair::default(),
                }
            });

        let day = calendar_day(record.timestamp);
        if let Some(report_day) = window.day_of(day) {
            *entry.revenue.get_mut(report_day) += record.total_revenue;
            if report_day == ReportDay::Newest && entry.newest_status.is_none() {
                entry.newest_status = Some(record.status.clone());
            }
        }
    }

    let offers: Vec<OfferSummary> = order
        .into_iter()
        .filter_map(|offer_id| {
            let entry = scratch.remove(&offer_id)?;
            let delta = entry.revenue.newest - entry.revenue.second_newest;
            let budget_type = budgets.budget_type(&offer_id);
            Some(OfferSummary {
                offer_id,
                app_id: entry.app_id,
                status: entry
                    .newest_status
                    .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                geo: entry.geo,
                advertiser: entry.advertiser,
                percent_change: percent_change(entry.revenue.newest, entry.revenue.second_newest),
                revenue: entry.revenue,
                delta,
                budget_type,
            })
        })
        .collect();

    let high_variance: HashSet<String> = offers
        .iter()
        .filter(|offer| offer.is_high_variance())
        .map(|offer| offer.offer_id.clone())
        .collect();

    debug!(
        "Aggregated {} offers over {}..{}: {} high-variance",
        offers.len(),
        window.second_newest,
        window.newest,
        high_variance.len()
    );
    OfferAggregation {
        offers,
        high_variance,
    }
}
