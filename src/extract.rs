// Stock report extraction
//
// HMED stock report workbooks have a single "Sheet1" laid out as:
// - Header cells (A1 province, A2 facility, A7 reporting window)
// - Drug sections opened by "- <drug name>" marker rows in column A
// - Section rows carrying drug source, unit and stock movement per source

pub mod error;
pub mod header_parser;
pub mod layout;
pub mod marker_locator;
pub mod record;
pub mod row_segmenter;
pub mod sheet;
pub mod workbook_reader;

pub use error::ExtractError;
pub use header_parser::{parse_header, HeaderInfo, ReportPeriod};
pub use layout::{CellAddress, SheetLayout};
pub use marker_locator::{locate_markers, Marker};
pub use record::{normalize_row, InventoryRecord, StockMovement};
pub use row_segmenter::{segment_rows, RawStockRow};
pub use sheet::Sheet;
pub use workbook_reader::StockReportReader;

use tracing::warn;

/// Run header parsing, marker scan, segmentation and normalization on a sheet
///
/// Either every record of the sheet is returned or the first error.
pub fn extract_records(
    sheet: &Sheet,
    layout: &SheetLayout,
) -> Result<Vec<InventoryRecord>, ExtractError> {
    let header = parse_header(sheet, layout)?;

    let markers = locate_markers(sheet, layout);
    if markers.len() < 2 {
        warn!(
            "Only {} marker rows found, sheet yields no records",
            markers.len()
        );
    }

    segment_rows(sheet, &markers, layout)
        .iter()
        .map(|raw| normalize_row(&header, raw, layout))
        .collect()
}
