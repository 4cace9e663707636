use crate::dataset::ReportDataset;
use crate::errors::Result;
use crate::report::assembly::DailyReportBundle;

/// Trait defining the contract for daily report generation.
pub trait DailyReportServiceTrait: Send + Sync {
    /// Runs the full pipeline over a parsed dataset and returns the
    /// assembled report bundle.
    fn generate(&self, dataset: &ReportDataset) -> Result<DailyReportBundle>;
}
