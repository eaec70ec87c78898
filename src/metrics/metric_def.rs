use super::MetricPath;
use strum::Display;

/// Which direction counts as an improvement for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Polarity {
    #[strum(serialize = "Higher=Better")]
    HigherIsBetter,

    #[strum(serialize = "Lower=Better")]
    LowerIsBetter,
}

#[derive(Debug)]
pub struct MetricDef {
    pub label: &'static str,
    pub path: MetricPath,
    pub polarity: Polarity,

    /// Whether this metric appears in the comparison chart.
    pub charted: bool,
}

impl MetricDef {
    #[must_use]
    pub const fn category(&self) -> &'static str {
        self.path.category
    }
}

macro_rules! metric_def {
    ($label:expr, $category:expr, [$($key:expr),+ $(,)?], $polarity:ident, $charted:expr) => {
        MetricDef {
            label: $label,
            path: MetricPath::new($category, &[$($key),+]),
            polarity: Polarity::$polarity,
            charted: $charted,
        }
    };
}

pub const METRIC_DEFINITIONS: &[MetricDef] = &[
    metric_def!("Text Edit Dist", "text_block", ["all", "Edit_dist", "ALL_page_avg"], LowerIsBetter, true),
    metric_def!("Text BLEU", "text_block", ["all", "BLEU", "all"], HigherIsBetter, false),
    metric_def!("Text METEOR", "text_block", ["all", "METEOR", "all"], HigherIsBetter, false),
    metric_def!("Table TEDS", "table", ["all", "TEDS", "all"], HigherIsBetter, true),
    metric_def!("Table TEDS-Struct", "table", ["all", "TEDS_structure_only", "all"], HigherIsBetter, false),
    metric_def!("Table Edit Dist", "table", ["all", "Edit_dist", "ALL_page_avg"], LowerIsBetter, false),
    metric_def!("Reading Order Edit Dist", "reading_order", ["all", "Edit_dist", "ALL_page_avg"], LowerIsBetter, false),
];

/// Labels of all metrics, in report column order.
pub fn labels() -> impl Iterator<Item = &'static str> {
    METRIC_DEFINITIONS.iter().map(|def| def.label)
}

/// Metrics shown in the comparison chart, higher-is-better first.
pub fn charted_metrics() -> Vec<&'static MetricDef> {
    let mut charted: Vec<_> = METRIC_DEFINITIONS.iter().filter(|def| def.charted).collect();
    charted.sort_by_key(|def| def.polarity != Polarity::HigherIsBetter);
    charted
}
