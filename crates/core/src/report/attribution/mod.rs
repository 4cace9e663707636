//! Affiliate attribution for high-variance offers.
//!
//! Explains each sharp offer-level revenue movement by the affiliates behind
//! it: per-affiliate two-day deltas in revenue, clicks, and conversion rate,
//! rendered as one report line per significant mover.

mod attribution_calculator;
mod attribution_model;

pub use attribution_calculator::*;
pub use attribution_model::*;
