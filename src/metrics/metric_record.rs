use super::{METRIC_DEFINITIONS, MetricDef, MetricValue, PathError};
use ohno::bail;

/// A label that could not be filled from the source tree, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGap {
    pub label: &'static str,
    pub category: &'static str,
    pub reason: PathError,
}

/// Normalized metrics for one backend.
///
/// Holds exactly one value per entry of [`METRIC_DEFINITIONS`], in definition
/// order. Missing data is [`MetricValue::NotAvailable`], never an absent key.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    values: Vec<MetricValue>,
    gaps: Vec<FieldGap>,
    malformed_categories: Vec<&'static str>,
}

impl MetricRecord {
    /// Build a record by evaluating `f` once per metric definition.
    pub fn from_fn(mut f: impl FnMut(&'static MetricDef) -> Result<f64, PathError>) -> Self {
        let mut values = Vec::with_capacity(METRIC_DEFINITIONS.len());
        let mut gaps = Vec::new();

        for def in METRIC_DEFINITIONS {
            match f(def) {
                Ok(n) => values.push(MetricValue::Number(n)),
                Err(reason) => {
                    values.push(MetricValue::NotAvailable);
                    gaps.push(FieldGap {
                        label: def.label,
                        category: def.category(),
                        reason,
                    });
                }
            }
        }

        Self {
            values,
            gaps,
            malformed_categories: Vec::new(),
        }
    }

    /// Build a record from values already in definition order.
    pub fn from_values(values: Vec<MetricValue>) -> crate::Result<Self> {
        if values.len() != METRIC_DEFINITIONS.len() {
            bail!("expected {} metric values, got {}", METRIC_DEFINITIONS.len(), values.len());
        }

        Ok(Self {
            values,
            gaps: Vec::new(),
            malformed_categories: Vec::new(),
        })
    }

    /// Value for `label`, or `None` if `label` is not a known metric.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<MetricValue> {
        METRIC_DEFINITIONS
            .iter()
            .position(|def| def.label == label)
            .and_then(|index| self.values.get(index).copied())
    }

    #[must_use]
    pub fn values(&self) -> &[MetricValue] {
        &self.values
    }

    /// Labels that fell back to [`MetricValue::NotAvailable`] during decoding.
    #[must_use]
    pub fn gaps(&self) -> &[FieldGap] {
        &self.gaps
    }

    /// Categories present in the source tree that were not objects.
    #[must_use]
    pub fn malformed_categories(&self) -> &[&'static str] {
        &self.malformed_categories
    }

    pub(super) fn with_malformed_categories(mut self, categories: Vec<&'static str>) -> Self {
        self.malformed_categories = categories;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_fills_every_label() {
        let record = MetricRecord::from_fn(|_| Err(PathError::MissingKey { key: "all" }));
        assert_eq!(record.values().len(), METRIC_DEFINITIONS.len());
        assert!(record.values().iter().all(|v| *v == MetricValue::NotAvailable));
        assert_eq!(record.gaps().len(), METRIC_DEFINITIONS.len());
    }

    #[test]
    fn test_from_fn_records_gap_details() {
        let record = MetricRecord::from_fn(|def| if def.category() == "table" { Ok(0.5) } else { Err(PathError::MissingKey { key: def.category() }) });
        assert_eq!(record.get("Table TEDS"), Some(MetricValue::Number(0.5)));
        assert_eq!(record.get("Text BLEU"), Some(MetricValue::NotAvailable));

        let gap = record.gaps().iter().find(|g| g.label == "Reading Order Edit Dist").unwrap();
        assert_eq!(gap.category, "reading_order");
        assert_eq!(gap.reason, PathError::MissingKey { key: "reading_order" });
    }

    #[test]
    fn test_from_values_rejects_wrong_length() {
        assert!(MetricRecord::from_values(vec![MetricValue::Number(1.0)]).is_err());
        let record = MetricRecord::from_values(vec![MetricValue::Number(1.0); METRIC_DEFINITIONS.len()]).unwrap();
        assert!(record.values().iter().all(MetricValue::is_available));
    }

    #[test]
    fn test_get_unknown_label() {
        let record = MetricRecord::from_fn(|_| Ok(1.0));
        assert_eq!(record.get("Overall"), None);
    }

    #[test]
    fn test_get_follows_definition_order() {
        let mut next = 0.0;
        let record = MetricRecord::from_fn(|_| {
            next += 1.0;
            Ok(next)
        });
        assert_eq!(record.get("Text Edit Dist"), Some(MetricValue::Number(1.0)));
        assert_eq!(record.get("Reading Order Edit Dist"), Some(MetricValue::Number(7.0)));
    }
}
