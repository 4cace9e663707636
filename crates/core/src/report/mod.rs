//! Daily report pipeline.
//!
//! Leaf components (budget classification, offer aggregation, affiliate
//! attribution, tier summaries, reject rates) feed the assembler, which
//! produces the four report tables. `DailyReportService` orchestrates the
//! whole run and emits progress events along the way.

pub mod assembly;
pub mod attribution;
pub mod offers;
pub mod rejects;
pub mod tiers;

mod report_service;
mod report_traits;

pub use assembly::*;
pub use attribution::*;
pub use offers::*;
pub use rejects::*;
pub use report_service::*;
pub use report_traits::*;
pub use tiers::*;

#[cfg(test)]
mod report_service_tests;
