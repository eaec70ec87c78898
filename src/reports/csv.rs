use super::{Aggregate, ReportTable, common};
use crate::Result;
use crate::discovery::BackendId;
use crate::metrics::{MetricRecord, MetricValue, NOT_AVAILABLE};
use ohno::{IntoAppError, bail};
use std::io::{Read, Write};

/// Write `table` as CSV: a header row, then one row per backend.
pub fn generate<W: Write>(table: &ReportTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(common::header()).into_app_err("writing CSV header")?;
    for row in table.rows() {
        csv_writer
            .write_record(common::row_cells(row))
            .into_app_err_with(|| format!("writing CSV row for '{}'", row.backend))?;
    }

    csv_writer.flush().into_app_err("flushing CSV output")?;
    Ok(())
}

/// Read a report previously written by [`generate`].
///
/// The header must match the current metric labels exactly. `N/A` cells become
/// [`MetricValue::NotAvailable`].
pub fn read<R: Read>(reader: R) -> Result<Aggregate> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let expected = common::header();
    let found = csv_reader.headers().into_app_err("reading CSV header")?;
    if found.iter().ne(expected.iter().copied()) {
        bail!("unexpected CSV header '{}', expected '{}'", found.iter().collect::<Vec<_>>().join(","), expected.join(","));
    }

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let line = index + 2;
        let record = result.into_app_err_with(|| format!("reading CSV line {line}"))?;

        let mut cells = record.iter();
        let Some(backend) = cells.next() else {
            bail!("CSV line {line} is empty");
        };

        let values = cells.map(|cell| parse_value(cell, line)).collect::<Result<Vec<_>>>()?;
        let record = MetricRecord::from_values(values)?;
        rows.push((BackendId::new(backend), record));
    }

    Ok(ReportTable::aggregate(rows))
}

fn parse_value(cell: &str, line: usize) -> Result<MetricValue> {
    if cell == NOT_AVAILABLE {
        return Ok(MetricValue::NotAvailable);
    }

    cell.parse::<f64>()
        .map(MetricValue::Number)
        .into_app_err_with(|| format!("invalid metric value '{cell}' on CSV line {line}"))
}
