//! Offer-level analytics.
//!
//! Classifies each offer's budget age against a trailing lookback and
//! aggregates per-offer two-day revenue, producing the high-variance set the
//! attribution step narrates.

mod budget_classifier;
mod offer_aggregator;
mod offer_model;

pub use budget_classifier::*;
pub use offer_aggregator::*;
pub use offer_model::*;

#[cfg(test)]
mod budget_classifier_tests;
