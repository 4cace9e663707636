//! Offer budget classification.

use std::collections::HashSet;

use chrono::Duration;
use log::debug;
use rust_decimal::Decimal;

use crate::constants::BUDGET_LOOKBACK_DAYS;
use crate::dataset::{DateWindow, PerformanceRecord};
use crate::utils::time_utils::calendar_day;

use super::BudgetType;

/// Which offers were already spending before the newest day.
#[derive(Debug, Clone, Default)]
pub struct BudgetClassification {
    old_budget: HashSet<String>,
    all_offers: HashSet<String>,
}

/// Classifies every offer in the performance data.
///
/// An offer is "old budget" when any of its records dated strictly before
/// the newest day, and no more than `BUDGET_LOOKBACK_DAYS` before it, carries
/// positive revenue. Revenue on the newest day itself never makes an offer
/// old; zero-revenue lookback rows do not either.
pub fn classify_budgets(
    records: &[PerformanceRecord],
    window: &DateWindow,
) -> BudgetClassification {
    let lookback_start = window.newest - Duration::days(BUDGET_LOOKBACK_DAYS);

    let mut old_budget = HashSet::new();
    let mut all_offers = HashSet::new();
    for record in records {
        all_offers.insert(record.offer_id.clone());

        let day = calendar_day(record.timestamp);
        if day < window.newest && day >= lookback_start && record.total_revenue > Decimal::ZERO {
            old_budget.insert(record.offer_id.clone());
        }
    }

    debug!(
        "Classified {} offers: {} old budget, {} new budget",
        all_offers.len(),
        old_budget.len(),
        all_offers.len() - old_budget.len()
    );
    BudgetClassification {
        old_budget,
        all_offers,
    }
}

impl BudgetClassification {
    pub fn budget_type(&self, offer_id: &str) -> BudgetType {
        if self.old_budget.contains(offer_id) {
            BudgetType::Old
        } else {
            BudgetType::New
        }
    }

    /// Offers spending in the lookback before the newest day.
    pub fn old_budget_count(&self) -> usize {
        self.old_budget.len()
    }

    /// Offers with no lookback spend.
    pub fn new_budget_count(&self) -> usize {
        self.all_offers.len() - self.old_budget.len()
    }

    pub fn total_offers(&self) -> usize {
        self.all_offers.len()
    }
}
