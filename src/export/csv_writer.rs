use std::path::Path;

use crate::db::{AggregateRow, Periodicity};
use crate::export::{column_headers, ExportError};

/// Write an aggregate report as CSV with a header line
pub fn write_csv(
    path: &Path,
    periodicity: Periodicity,
    rows: &[AggregateRow],
) -> Result<(), ExportError> {
    // Headers are written by hand: the period column name depends on the view
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(column_headers(periodicity))?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
