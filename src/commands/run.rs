//! Command dispatch logic for parsebench

use super::{InitArgs, ReportArgs, ShowArgs, init_config, process_report, show_report};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "parsebench", version, author, long_about = None)]
#[command(about = "Compare document-parsing backends from their benchmark metric files")]
#[command(styles = CLAP_STYLES, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate metric files into a console, CSV, and chart report (default)
    Report(Box<ReportArgs>),
    /// Print a previously written CSV report
    Show(ShowArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        None => process_report(host, &cli.report),
        Some(Command::Report(report_args)) => process_report(host, &report_args),
        Some(Command::Show(show_args)) => show_report(host, &show_args),
        Some(Command::Init(init_args)) => init_config(host, &init_args),
    }
}
