//! Grouped bar chart comparing backends
//!
//! Charting is optional: it needs the `chart` feature and a TrueType font to
//! label the axes with. [`ChartCapability::detect`] checks both once, up front,
//! so a missing capability skips the chart channel entirely instead of failing
//! on every attempt.

mod layout;

#[cfg(feature = "chart")]
mod renderer;

#[cfg(not(feature = "chart"))]
mod renderer {
    use super::ChartSettings;
    use crate::Result;
    use crate::reports::ReportTable;
    use camino::Utf8Path;

    /// Cannot be constructed without the `chart` feature.
    #[derive(Debug)]
    pub enum ChartRenderer {}

    impl ChartRenderer {
        pub fn load(_settings: &ChartSettings) -> Result<Self, String> {
            Err("chart support was not compiled in".to_string())
        }

        pub fn save(&self, _table: &ReportTable, _path: &Utf8Path) -> Result<()> {
            match *self {}
        }
    }
}

pub use layout::{BarRect, ChartLayout, axis_max};
pub use renderer::ChartRenderer;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "     chart";

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSettings {
    /// Whether to produce a chart at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// TrueType font for chart text; common system fonts are tried when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Utf8PathBuf>,

    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

const fn default_enabled() -> bool {
    true
}

const fn default_width() -> u32 {
    1000
}

const fn default_height() -> u32 {
    600
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            font: None,
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Whether charts can be drawn in this environment.
#[derive(Debug)]
pub enum ChartCapability {
    Available(ChartRenderer),
    Unavailable(String),
}

impl ChartCapability {
    #[must_use]
    pub fn detect(settings: &ChartSettings) -> Self {
        if !settings.enabled {
            return Self::Unavailable("chart generation is disabled".to_string());
        }

        match ChartRenderer::load(settings) {
            Ok(renderer) => Self::Available(renderer),
            Err(reason) => {
                log::debug!(target: LOG_TARGET, "Chart capability unavailable: {reason}");
                Self::Unavailable(reason)
            }
        }
    }
}
