//! Advertiser-tier daily summaries.
//!
//! Rolls performance traffic up to advertiser tiers (second or third level)
//! per report day. The tier-3 summary is a report table of its own; the
//! tier-2 summary also anchors reject-rate computation.

mod tier_model;
mod tier_reporter;

pub use tier_model::*;
pub use tier_reporter::*;
