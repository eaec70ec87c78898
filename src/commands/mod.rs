//! Command-line interface and orchestration for parsebench
//!
//! # Commands
//!
//! - **report** (the default when no command is named): discover metric files,
//!   decode them, fold them into a table, and render the console, CSV, and chart
//!   outputs
//! - **show**: print a previously written CSV report as a console table
//! - **init**: write the default configuration file
//!
//! ## Execution Flow
//!
//! `run` parses the arguments with clap and routes to the command handler. The
//! report pipeline is strictly linear: a file that cannot be decoded is skipped
//! with a notice, a render channel that fails is skipped with a notice, and
//! only the lack of any usable data ends the run early. Everything user-facing
//! goes through the [`Host`] so tests can capture it.

mod common;
mod host;
mod init;
mod report;
mod run;
mod show;

pub use common::{ColorMode, CommonArgs, LogLevel};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use show::{ShowArgs, show_report};
