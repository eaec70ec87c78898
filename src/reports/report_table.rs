use crate::discovery::BackendId;
use crate::metrics::MetricRecord;

/// One backend's row in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub backend: BackendId,
    pub record: MetricRecord,
}

/// Rows in discovery order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    rows: Vec<ReportRow>,
}

/// Result of folding decoded records into a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    Table(ReportTable),

    /// No record survived decoding; there is nothing to render.
    NoUsableData,
}

impl ReportTable {
    /// Fold `(backend, record)` pairs into a table, preserving their order.
    pub fn aggregate(records: impl IntoIterator<Item = (BackendId, MetricRecord)>) -> Aggregate {
        let rows: Vec<_> = records.into_iter().map(|(backend, record)| ReportRow { backend, record }).collect();

        if rows.is_empty() {
            Aggregate::NoUsableData
        } else {
            Aggregate::Table(Self { rows })
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
