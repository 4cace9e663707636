//! Composes calculator outputs into the report bundle.

use std::collections::HashMap;

use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;

use crate::constants::{DISPLAY_DECIMAL_PRECISION, NO_SIGNIFICANT_CHANGE};
use crate::dataset::{DateWindow, DayPair};
use crate::report::attribution::OfferAttribution;
use crate::report::offers::{BudgetClassification, OfferAggregation};
use crate::report::rejects::{AffiliateRejectMetrics, TierRejectMetrics};
use crate::report::tiers::TierDailyMetrics;

use super::{
    AffiliateRejectRow, DailyReportBundle, HighVarianceOfferRow, ReportSummary, TierDailyRow,
    TierRejectRow,
};

fn rounded(value: Decimal) -> Decimal {
    value.round_dp(DISPLAY_DECIMAL_PRECISION)
}

fn rounded_pair(pair: DayPair<Decimal>) -> DayPair<Decimal> {
    pair.map(rounded)
}

/// Assembles the four report tables and the summary into one bundle.
///
/// Currency and percentage fields are rounded to display precision here and
/// nowhere earlier, so intermediate math keeps full precision. Counts stay
/// integral. The offer table keeps the aggregator's first-appearance order,
/// filtered down to the high-variance id set; offers whose attribution has no
/// significant contributors get the no-change sentinel instead of an empty
/// cell.
pub fn assemble_report(
    window: &DateWindow,
    tier_daily: &[TierDailyMetrics],
    aggregation: &OfferAggregation,
    attributions: &HashMap<String, OfferAttribution>,
    tier_rejects: &[TierRejectMetrics],
    affiliate_rejects: &[AffiliateRejectMetrics],
    budgets: &BudgetClassification,
) -> DailyReportBundle {
    let tier_daily_rows: Vec<TierDailyRow> = tier_daily
        .iter()
        .map(|tier| TierDailyRow {
            tier: tier.tier.clone(),
            revenue: rounded_pair(tier.revenue),
            profit: rounded_pair(tier.profit),
        })
        .collect();

    let offer_rows: Vec<HighVarianceOfferRow> = aggregation
        .offers
        .iter()
        .filter(|offer| aggregation.high_variance.contains(&offer.offer_id))
        .map(|offer| {
            let attribution = attributions
                .get(&offer.offer_id)
                .map(|attribution| attribution.summary.as_str())
                .filter(|summary| !summary.is_empty())
                .unwrap_or(NO_SIGNIFICANT_CHANGE);
            HighVarianceOfferRow {
                offer_id: offer.offer_id.clone(),
                app_id: offer.app_id.clone(),
                status: offer.status.clone(),
                geo: offer.geo.clone(),
                advertiser: offer.advertiser.clone(),
                revenue: rounded_pair(offer.revenue),
                delta: rounded(offer.delta),
                percent_change: rounded(offer.percent_change),
                budget_type: offer.budget_type.as_str().to_string(),
                attribution: attribution.to_string(),
            }
        })
        .collect();

    let tier_reject_rows: Vec<TierRejectRow> = tier_rejects
        .iter()
        .map(|tier| TierRejectRow {
            tier: tier.tier.clone(),
            revenue: rounded_pair(tier.revenue),
            profit: rounded_pair(tier.profit),
            conversions: tier.conversions,
            rejects: tier.rejects,
            reject_rate: rounded_pair(tier.reject_rate),
        })
        .collect();

    let affiliate_rows: Vec<AffiliateRejectRow> = affiliate_rejects
        .iter()
        .map(|affiliate| AffiliateRejectRow {
            affiliate: affiliate.affiliate.clone(),
            revenue: rounded_pair(affiliate.revenue),
            profit: rounded_pair(affiliate.profit),
            conversions: affiliate.conversions,
            rejects: affiliate.rejects,
            reject_rate: rounded_pair(affiliate.reject_rate),
            associated_tiers: affiliate.associated_tiers.clone(),
        })
        .collect();

    let summary = ReportSummary {
        high_variance_offers: offer_rows.len(),
        old_budget_offers: budgets.old_budget_count(),
        new_budget_offers: budgets.new_budget_count(),
    };

    debug!(
        "Assembled report {} -> {}: {} tier rows, {} high-variance offers, {} tier reject rows, {} affiliate rows",
        window.second_newest,
        window.newest,
        tier_daily_rows.len(),
        offer_rows.len(),
        tier_reject_rows.len(),
        affiliate_rows.len()
    );
    DailyReportBundle {
        window: *window,
        tier_daily: tier_daily_rows,
        high_variance_offers: offer_rows,
        tier_rejects: tier_reject_rows,
        affiliate_rejects: affiliate_rows,
        summary,
        generated_at: Utc::now(),
    }
}
