use tracing::debug;

use crate::extract::layout::SheetLayout;
use crate::extract::sheet::Sheet;

/// A drug name row opening a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Absolute zero-based row index
    pub row: u32,
    pub drug_name: String,
}

/// Extract the drug name from marker text
///
/// Only the leading hyphen is removed; hyphens inside the name are kept
/// ("- Amox-500" -> "Amox-500"). Returns `None` when the text is not a marker.
pub fn drug_name_from_marker(text: &str) -> Option<String> {
    text.strip_prefix('-').map(|rest| rest.trim().to_string())
}

/// Find every marker row in the sheet, top to bottom
///
/// Only the marker column is inspected. Non-text cells count as their displayed
/// text, so a numeric first cell is a marker only if it is negative.
pub fn locate_markers(sheet: &Sheet, layout: &SheetLayout) -> Vec<Marker> {
    let markers: Vec<Marker> = sheet
        .rows()
        .filter_map(|row| {
            let text = sheet.text(row, layout.marker_col)?;
            drug_name_from_marker(&text).map(|drug_name| Marker { row, drug_name })
        })
        .collect();

    debug!("Found {} marker rows", markers.len());
    markers
}
