use super::Host;
use super::common::{CommonArgs, init_logging};
use crate::Result;
use crate::config::Config;
use crate::discovery::{Discovery, MetricFileLocator};
use crate::metrics::MetricDecoder;
use crate::reports::{Aggregate, ChartCapability, ReportTable, generate_console, generate_csv};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use ohno::{IntoAppError, app_err};
use std::fs;
use std::io::{BufWriter, Write};

const LOG_TARGET: &str = "    report";

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory holding the per-backend metric files
    #[arg(long, value_name = "PATH")]
    pub result_dir: Option<Utf8PathBuf>,

    /// Path to configuration file (default is `parsebench.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Write the CSV report to this path
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Write the comparison chart to this path
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub chart: Option<Utf8PathBuf>,

    /// Don't generate the comparison chart
    #[arg(long, help_heading = "Report Output")]
    pub no_chart: bool,

    /// TrueType font used for chart text
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub chart_font: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ReportArgs {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.result_dir {
            config.result_dir.clone_from(dir);
        }

        if let Some(csv) = &self.csv {
            config.csv_output.clone_from(csv);
        }

        if let Some(chart) = &self.chart {
            config.chart_output.clone_from(chart);
        }

        if self.no_chart {
            config.chart.enabled = false;
        }

        if let Some(font) = &self.chart_font {
            config.chart.font = Some(font.clone());
        }
    }
}

/// Discover, decode, aggregate, and render.
///
/// Finding nothing to report on is not an error. The only failure that makes
/// this return `Err` once data was found is being unable to write the CSV report.
pub fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let mut config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    args.apply(&mut config);
    config.validate()?;

    let sources = match MetricFileLocator::new(config.sources.clone()).locate(&config.result_dir)? {
        Discovery::Found { sources, replaced } => {
            for earlier in &replaced {
                if let Some(kept) = sources.iter().find(|s| s.backend == earlier.backend) {
                    let _ = writeln!(
                        host.error(),
                        "Warning: ignoring '{}', backend '{}' is also provided by '{}'",
                        earlier.path,
                        earlier.backend,
                        kept.path
                    );
                }
            }
            sources
        }
        Discovery::NoData(reason) => {
            let _ = writeln!(host.output(), "No result data found: {reason}.");
            return Ok(());
        }
    };

    let discovered = sources.len();
    let decoder = MetricDecoder::new();
    let mut records = Vec::with_capacity(discovered);
    for source in sources {
        match decoder.decode_file(&source.path) {
            Ok(record) => {
                for category in record.malformed_categories() {
                    let _ = writeln!(
                        host.error(),
                        "Warning: category '{category}' in '{}' is not an object, its metrics are reported as N/A",
                        source.path
                    );
                }
                records.push((source.backend, record));
            }
            Err(e) => {
                let _ = writeln!(host.output(), "Skipping metrics for '{}': {e}", source.backend);
            }
        }
    }

    let table = match ReportTable::aggregate(records) {
        Aggregate::Table(table) => table,
        Aggregate::NoUsableData => {
            let _ = writeln!(
                host.output(),
                "No result data found: none of the {discovered} metric file(s) could be decoded, nothing to report."
            );
            return Ok(());
        }
    };

    render(host, &table, &config, args.common.color.use_colors())
}

/// Run every output channel. A failing channel doesn't stop the others.
fn render<H: Host>(host: &mut H, table: &ReportTable, config: &Config, use_colors: bool) -> Result<()> {
    let chart = ChartCapability::detect(&config.chart);

    let mut console_output = String::new();
    match generate_console(table, use_colors, &mut console_output) {
        Ok(()) => {
            let _ = write!(host.output(), "{console_output}");
        }
        Err(e) => log::warn!(target: LOG_TARGET, "Could not render console report: {e:#}"),
    }

    let csv_result = write_csv(table, &config.csv_output);
    match &csv_result {
        Ok(()) => {
            let _ = writeln!(host.output(), "\nSaved to {}", config.csv_output);
        }
        Err(e) => {
            let _ = writeln!(host.output(), "\nUnable to write CSV report: {e:#}");
        }
    }

    match chart {
        ChartCapability::Available(renderer) => match create_parent_dir(&config.chart_output).and_then(|()| renderer.save(table, &config.chart_output)) {
            Ok(()) => {
                let _ = writeln!(host.output(), "Saved chart to {}", config.chart_output);
            }
            Err(e) => {
                let _ = writeln!(host.output(), "Error generating chart: {e:#}");
            }
        },
        ChartCapability::Unavailable(reason) => {
            let _ = writeln!(host.output(), "Skipping chart generation: {reason}");
        }
    }

    csv_result.map_err(|e| app_err!("unable to write CSV report to '{}': {e:#}", config.csv_output))
}

fn write_csv(table: &ReportTable, path: &Utf8Path) -> Result<()> {
    create_parent_dir(path)?;
    let file = fs::File::create(path).into_app_err_with(|| format!("creating '{path}'"))?;
    let mut writer = BufWriter::new(file);
    generate_csv(table, &mut writer)?;
    writer.flush().into_app_err_with(|| format!("writing '{path}'"))
}

fn create_parent_dir(path: &Utf8Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{parent}'"))
        }
        _ => Ok(()),
    }
}
