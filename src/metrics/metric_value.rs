use core::fmt;

/// Placeholder written wherever a metric is genuinely missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single normalized metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Numeric value copied verbatim from the source tree.
    Number(f64),

    /// The source did not provide a usable value. Distinct from zero.
    NotAvailable,
}

impl MetricValue {
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::NotAvailable => None,
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Value to plot; missing data is drawn as zero.
    #[must_use]
    pub fn plot_value(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}
