use super::Host;
use super::common::{CommonArgs, init_logging};
use crate::Result;
use crate::reports::{Aggregate, generate_console, read_csv};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{EnrichableExt, IntoAppError};
use std::fs::File;
use std::io::{BufReader, Write};

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// CSV report to display (default is `benchmark_report.csv`)
    #[arg(value_name = "PATH", default_value = "benchmark_report.csv")]
    pub report: Utf8PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_report<H: Host>(host: &mut H, args: &ShowArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let file = File::open(&args.report).into_app_err_with(|| format!("opening report '{}'", args.report))?;
    let aggregate = read_csv(BufReader::new(file)).map_err(|e| e.enrich_with(|| format!("reading report '{}'", args.report)))?;

    let Aggregate::Table(table) = aggregate else {
        let _ = writeln!(host.output(), "No result data found in '{}'.", args.report);
        return Ok(());
    };

    let mut console_output = String::new();
    generate_console(&table, args.common.color.use_colors(), &mut console_output)?;
    let _ = write!(host.output(), "{console_output}");
    Ok(())
}
