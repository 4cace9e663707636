//! Core error types for the report engine.
//!
//! This module defines the typed failures the pipeline can surface. Schema and
//! validation errors carry enough context (table, row, column) for the caller
//! to point at the offending cell of the uploaded workbook. Zero-denominator
//! arithmetic is never an error anywhere in the engine; every division is
//! guarded and produces a documented sentinel instead.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the report engine.
///
/// A report run either fully succeeds or fails with one of these before any
/// output table is produced; there are no partial results.
#[derive(Error, Debug)]
pub enum Error {
    /// The performance data does not span the two distinct calendar days the
    /// comparative report is built on.
    #[error("Performance data covers {distinct_days} distinct day(s); at least two are required")]
    InsufficientData { distinct_days: usize },

    #[error("Input schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Structural problems with an input table.
///
/// Raised while mapping the generic tables delivered by the spreadsheet
/// parser into typed records, before any computation starts.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A required column is absent from a table's header row.
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },
}

/// Cell-level problems with an input table.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A cell holds a value that cannot be parsed as the column's type.
    /// `row` is zero-based over the data rows, header excluded.
    #[error("Table '{table}' row {row}, column '{column}': cannot parse '{value}' as {expected}")]
    InvalidCell {
        table: String,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
