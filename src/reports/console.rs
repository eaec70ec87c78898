use super::{ReportTable, common};
use crate::Result;
use crate::metrics::NOT_AVAILABLE;
use core::fmt::Write;
use owo_colors::OwoColorize;

const BANNER_WIDTH: usize = 50;
const TITLE: &str = "OMNIDOCBENCH EVALUATION REPORT";

pub fn generate<W: Write>(table: &ReportTable, use_colors: bool, writer: &mut W) -> Result<()> {
    let banner = "=".repeat(BANNER_WIDTH);
    writeln!(writer)?;
    writeln!(writer, "{banner}")?;
    if use_colors {
        writeln!(writer, "{}", TITLE.bold())?;
    } else {
        writeln!(writer, "{TITLE}")?;
    }
    writeln!(writer, "{banner}")?;
    writeln!(writer)?;

    let header = common::header();
    let rows: Vec<Vec<String>> = table.rows().iter().map(common::row_cells).collect();

    // Column widths are measured on the plain text so colors don't skew alignment
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(col, title)| {
            rows.iter()
                .filter_map(|cells| cells.get(col))
                .map(|cell| cell.chars().count())
                .chain(core::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(writer, header.iter().copied(), &widths, |cell| use_colors.then(|| cell.bold().to_string()))?;

    write!(writer, "|")?;
    for width in &widths {
        write!(writer, ":{}|", "-".repeat(width + 1))?;
    }
    writeln!(writer)?;

    for cells in &rows {
        write_row(writer, cells.iter().map(String::as_str), &widths, |cell| {
            (use_colors && cell == NOT_AVAILABLE).then(|| cell.dimmed().to_string())
        })?;
    }

    Ok(())
}

/// Write one `| a | b |` line, padding each cell to its column width.
///
/// `style` may return a decorated rendition of a cell; padding is still based
/// on the undecorated text.
fn write_row<'a, W: Write>(
    writer: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    style: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    write!(writer, "|")?;
    for (cell, width) in cells.zip(widths) {
        let padding = width.saturating_sub(cell.chars().count());
        let styled = style(cell);
        write!(writer, " {}{} |", styled.as_deref().unwrap_or(cell), " ".repeat(padding))?;
    }
    writeln!(writer)?;
    Ok(())
}
