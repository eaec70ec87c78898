//! Report aggregation and rendering
//!
//! Decoded records are folded into a [`ReportTable`], one row per backend in
//! discovery order, and the table is rendered through independent channels:
//! - **Console**: banner plus a Markdown pipe table, optionally colored
//! - **CSV**: `Parser` column plus one column per metric, `N/A` for missing data
//! - **Chart**: grouped bar chart PNG, when the environment can draw one
//!
//! Each generator only formats; deciding which channels run and absorbing their
//! failures is left to the caller.

pub mod chart;
mod common;
mod console;
mod csv;
mod report_table;

pub use chart::{ChartCapability, ChartRenderer, ChartSettings};
pub use common::BACKEND_COLUMN;
pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use csv::read as read_csv;
pub use report_table::{Aggregate, ReportRow, ReportTable};
