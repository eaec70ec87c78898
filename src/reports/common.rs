//! Common utilities shared across report generators.

use super::ReportRow;
use crate::metrics::labels;

/// Title of the leading column holding backend identifiers.
pub const BACKEND_COLUMN: &str = "Parser";

/// Column headers: the backend column followed by every metric label.
pub fn header() -> Vec<&'static str> {
    core::iter::once(BACKEND_COLUMN).chain(labels()).collect()
}

/// Cells of a row as text, in header order.
pub fn row_cells(row: &ReportRow) -> Vec<String> {
    core::iter::once(row.backend.to_string())
        .chain(row.record.values().iter().map(ToString::to_string))
        .collect()
}
