//! End-to-end report pipeline orchestration.

use std::sync::Arc;

use log::debug;

use crate::dataset::{DateWindow, RejectRuleSet, ReportDataset, TierLookup};
use crate::errors::Result;
use crate::events::{NoOpProgressSink, ProgressEvent, ProgressSink, ReportPhase};

use super::assembly::{assemble_report, DailyReportBundle};
use super::attribution::attribute_affiliates;
use super::offers::{aggregate_offers, classify_budgets};
use super::rejects::{affiliate_reject_metrics, count_tier_rejects, tier_reject_metrics};
use super::report_traits::DailyReportServiceTrait;
use super::tiers::{summarize_tiers, TierLevel};

/// Drives the report pipeline: window resolution, the aggregation passes in
/// dependency order, and final assembly, with a progress event at each phase
/// boundary.
#[derive(Clone)]
pub struct DailyReportService {
    progress: Arc<dyn ProgressSink>,
}

impl DailyReportService {
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgressSink),
        }
    }

    /// Sets the progress sink for this service.
    pub fn with_progress_sink(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    fn start_phase(&self, phase: ReportPhase) {
        debug!("{} ({}%)", phase.label(), phase.percent_complete());
        self.progress.emit(ProgressEvent::phase_started(phase));
    }
}

impl Default for DailyReportService {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyReportServiceTrait for DailyReportService {
    fn generate(&self, dataset: &ReportDataset) -> Result<DailyReportBundle> {
        self.start_phase(ReportPhase::ResolvingWindow);
        let window = DateWindow::resolve(&dataset.performance)?;

        let lookup = TierLookup::new(&dataset.advertiser_tiers);
        let rules = RejectRuleSet::new(&dataset.reject_rules);

        self.start_phase(ReportPhase::SummarizingTiers);
        let tier3_daily = summarize_tiers(&dataset.performance, &lookup, &window, TierLevel::Tier3);
        let tier2_daily = summarize_tiers(&dataset.performance, &lookup, &window, TierLevel::Tier2);

        self.start_phase(ReportPhase::AggregatingOffers);
        let budgets = classify_budgets(&dataset.performance, &window);
        let aggregation = aggregate_offers(&dataset.performance, &window, &budgets);

        self.start_phase(ReportPhase::AttributingAffiliates);
        let attributions =
            attribute_affiliates(&dataset.performance, &window, &aggregation.high_variance);

        self.start_phase(ReportPhase::ComputingRejects);
        let reject_counts = count_tier_rejects(&dataset.reject_events, &rules, &lookup, &window);
        let tier_rejects = tier_reject_metrics(&tier2_daily, &reject_counts);
        let affiliate_rejects =
            affiliate_reject_metrics(&dataset.performance, &lookup, &window, &reject_counts);

        self.start_phase(ReportPhase::AssemblingReport);
        let bundle = assemble_report(
            &window,
            &tier3_daily,
            &aggregation,
            &attributions,
            &tier_rejects,
            &affiliate_rejects,
            &budgets,
        );

        self.progress.emit(ProgressEvent::completed());
        debug!(
            "Daily report ready for {} vs {}",
            window.newest, window.second_newest
        );
        Ok(bundle)
    }
}
