use calamine::Data;
use tracing::debug;

use crate::extract::layout::{SheetLayout, MOVEMENT_COLUMNS};
use crate::extract::marker_locator::Marker;
use crate::extract::sheet::Sheet;

/// One populated section row, still as raw cells
#[derive(Debug, Clone, PartialEq)]
pub struct RawStockRow<'a> {
    /// Absolute zero-based row index
    pub row: u32,
    pub drug_name: &'a str,
    pub drug_source: &'a Data,
    pub drug_uom: Option<&'a Data>,
    pub movements: [Option<&'a Data>; MOVEMENT_COLUMNS],
}

/// Collect the populated rows of every section
///
/// A section runs strictly between two consecutive markers and belongs to the
/// drug of the first one. The last marker only closes the section before it.
/// Rows with a blank drug source cell are skipped.
pub fn segment_rows<'a>(
    sheet: &'a Sheet,
    markers: &'a [Marker],
    layout: &SheetLayout,
) -> Vec<RawStockRow<'a>> {
    let mut rows = Vec::new();

    for pair in markers.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        let before = rows.len();

        for row in start.row + 1..end.row {
            let Some(drug_source) = source_cell(sheet, row, layout.source_col) else {
                continue;
            };

            let mut movements = [None; MOVEMENT_COLUMNS];
            for (index, slot) in movements.iter_mut().enumerate() {
                *slot = sheet.cell(row, layout.movement_col(index));
            }

            rows.push(RawStockRow {
                row,
                drug_name: &start.drug_name,
                drug_source,
                drug_uom: sheet.cell(row, layout.uom_col),
                movements,
            });
        }

        debug!(
            "Section '{}' (rows {}..{}): {} populated rows",
            start.drug_name,
            start.row + 1,
            end.row + 1,
            rows.len() - before
        );
    }

    if let Some(last) = markers.last() {
        debug!(
            "Marker '{}' at row {} closes the last section",
            last.drug_name,
            last.row + 1
        );
    }

    rows
}

fn source_cell(sheet: &Sheet, row: u32, col: u32) -> Option<&Data> {
    sheet.cell(row, col).filter(|value| match value {
        Data::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}
