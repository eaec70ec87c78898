//! Compare document-parsing backends from their benchmark metric files.
//!
//! # Overview
//!
//! Each parsing backend under test converts the same PDFs to Markdown, and an
//! external evaluation engine scores those conversions against ground truth,
//! writing one JSON metric file per backend. `parsebench` gathers those files
//! into a single comparison.
//!
//! # Quick Start
//!
//! ```bash
//! parsebench --result-dir OmniDocBench/result
//! ```
//!
//! This prints a table of the key metrics for every backend, writes
//! `benchmark_report.csv`, and, when a font is available, draws
//! `benchmark_chart.png`.
//!
//! Re-display an existing report:
//!
//! ```bash
//! parsebench show benchmark_report.csv
//! ```
//!
//! Write a configuration file to customize paths and metric file suffixes:
//!
//! ```bash
//! parsebench init
//! ```

use parsebench::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host writing to the real standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }
}

fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
