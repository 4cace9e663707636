//! Typed input boundary for the report engine.
//!
//! The spreadsheet parser (an external collaborator) delivers each sheet as a
//! generic named-column table of string cells. This module owns the column
//! contract of those tables, maps them into typed records, and resolves the
//! two-day report window the whole pipeline compares.

mod dataset_model;
mod date_window;
mod table;

pub use dataset_model::*;
pub use date_window::*;
pub use table::*;
