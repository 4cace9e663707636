//! Reject analytics.
//!
//! Joins the advertiser event log to tier-2 values and reject rules, counts
//! reject events per tier per report day, and apportions those counts to
//! affiliates through their dominant tier associations.

mod reject_calculator;
mod reject_model;

pub use reject_calculator::*;
pub use reject_model::*;

#[cfg(test)]
mod reject_calculator_tests;
