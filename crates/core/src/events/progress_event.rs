//! Progress event types.

use serde::{Deserialize, Serialize};

/// Pipeline phases, in execution order.
///
/// Each phase carries the completion percentage the front-end progress bar
/// shows when the phase begins. The gaps below 20 and above 70 belong to the
/// excluded collaborators (spreadsheet parsing and report download).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPhase {
    ResolvingWindow,
    SummarizingTiers,
    AggregatingOffers,
    AttributingAffiliates,
    ComputingRejects,
    AssemblingReport,
}

impl ReportPhase {
    /// Human-readable label for progress display.
    pub fn label(&self) -> &'static str {
        match self {
            ReportPhase::ResolvingWindow => "Resolving report window",
            ReportPhase::SummarizingTiers => "Summarizing advertiser tiers",
            ReportPhase::AggregatingOffers => "Aggregating offer revenue",
            ReportPhase::AttributingAffiliates => "Attributing affiliate movements",
            ReportPhase::ComputingRejects => "Computing reject rates",
            ReportPhase::AssemblingReport => "Assembling report tables",
        }
    }

    /// Progress-bar percentage reported when this phase starts.
    pub fn percent_complete(&self) -> u8 {
        match self {
            ReportPhase::ResolvingWindow => 20,
            ReportPhase::SummarizingTiers => 30,
            ReportPhase::AggregatingOffers => 40,
            ReportPhase::AttributingAffiliates => 50,
            ReportPhase::ComputingRejects => 60,
            ReportPhase::AssemblingReport => 70,
        }
    }
}

/// Progress events emitted by the report pipeline.
///
/// These events represent facts about pipeline progress. Runtime adapters
/// translate them into platform-specific feedback (progress bars, status
/// lines, toasts).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A pipeline phase began.
    PhaseStarted { phase: ReportPhase },

    /// The run finished and the report bundle is ready.
    Completed,
}

impl ProgressEvent {
    /// Creates a PhaseStarted event.
    pub fn phase_started(phase: ReportPhase) -> Self {
        Self::PhaseStarted { phase }
    }

    /// Creates a Completed event.
    pub fn completed() -> Self {
        Self::Completed
    }

    /// Progress-bar percentage for this event.
    pub fn percent_complete(&self) -> u8 {
        match self {
            ProgressEvent::PhaseStarted { phase } => phase.percent_complete(),
            ProgressEvent::Completed => 100,
        }
    }
}
