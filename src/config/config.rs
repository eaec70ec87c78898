use crate::Result;
use crate::discovery::SourcePattern;
use crate::reports::ChartSettings;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given explicitly
pub const CONFIG_FILE_NAME: &str = "parsebench.toml";

const MIN_CHART_DIMENSION: u32 = 200;
const MAX_CHART_DIMENSION: u32 = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the per-backend metric files
    #[serde(default = "default_result_dir")]
    pub result_dir: Utf8PathBuf,

    /// Path of the CSV report
    #[serde(default = "default_csv_output")]
    pub csv_output: Utf8PathBuf,

    /// Path of the chart image
    #[serde(default = "default_chart_output")]
    pub chart_output: Utf8PathBuf,

    /// Filename suffixes that identify metric files
    #[serde(default = "default_sources")]
    pub sources: Vec<SourcePattern>,

    #[serde(default)]
    pub chart: ChartSettings,
}

fn default_result_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("OmniDocBench/result")
}

fn default_csv_output() -> Utf8PathBuf {
    Utf8PathBuf::from("benchmark_report.csv")
}

fn default_chart_output() -> Utf8PathBuf {
    Utf8PathBuf::from("benchmark_chart.png")
}

fn default_sources() -> Vec<SourcePattern> {
    vec![SourcePattern::new("_quick_match_metric_result.json")]
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `parsebench.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading parsebench configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading parsebench configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if no usable metric file suffix is configured or the chart size is out of range
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(app_err!("at least one entry in `sources` is required"));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.suffix.is_empty() {
                return Err(app_err!("source suffixes must not be empty"));
            }

            if !source.suffix.ends_with(".json") {
                return Err(app_err!("source suffix '{}' must end in '.json'", source.suffix));
            }

            if !seen.insert(source.suffix.as_str()) {
                return Err(app_err!("source suffix '{}' is listed more than once", source.suffix));
            }
        }

        for (name, value) in [("chart.width", self.chart.width), ("chart.height", self.chart.height)] {
            if !(MIN_CHART_DIMENSION..=MAX_CHART_DIMENSION).contains(&value) {
                return Err(app_err!(
                    "{name} must be between {MIN_CHART_DIMENSION} and {MAX_CHART_DIMENSION}, got {value}"
                ));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
