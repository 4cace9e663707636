//! Generic named-column tables.
//!
//! The shape the spreadsheet parser hands over: a table name, a header row,
//! and string-valued cells. The engine never touches the source file; it
//! resolves the columns it needs by name and parses cells on the way into
//! typed records.

use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;

/// A generic in-memory table as delivered by the spreadsheet parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    /// Logical table name, used in error messages
    pub name: String,
    /// Header row
    pub headers: Vec<String>,
    /// Data rows (each row is a vector of string cells)
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Resolves a header name to its column index.
    ///
    /// Headers are compared after trimming; spreadsheet headers routinely
    /// carry stray whitespace.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|candidate| candidate.trim() == header)
    }

    /// Resolves a required header name, reporting the table on failure.
    pub fn require_column(&self, header: &str) -> Result<usize, SchemaError> {
        self.column_index(header)
            .ok_or_else(|| SchemaError::MissingColumn {
                table: self.name.clone(),
                column: header.to_string(),
            })
    }

    /// Returns the cell at (row, column).
    ///
    /// Ragged rows are tolerated: a missing trailing cell reads as empty,
    /// matching how spreadsheet exports omit trailing blanks.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of data rows, header excluded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
