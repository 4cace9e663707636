//! AdPulse Core - Daily report analytics for ad-network performance data.
//!
//! This crate contains the report engine: it ingests the four daily input
//! tables (performance, advertiser map, reject events, reject rules) and
//! produces the comparative two-day report tables. It is I/O-agnostic;
//! spreadsheet parsing and report rendering live in the host application.

pub mod constants;
pub mod dataset;
pub mod errors;
pub mod events;
pub mod report;
pub mod utils;

// Re-export common types from the dataset and report modules
pub use dataset::*;
pub use report::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
