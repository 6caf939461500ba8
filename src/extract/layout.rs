use std::fmt;

use crate::utils::cell_ref;

/// Number of stock movement columns in a section row (H..N)
pub const MOVEMENT_COLUMNS: usize = 7;

/// Zero-based cell position inside a worksheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&cell_ref(self.row, self.col))
    }
}

/// Fixed positions of the HMED stock report layout
///
/// # Expected Sheet Structure:
/// ```text
/// A1: "<label>: <region>/<province> ..."
/// A2: "<label>: <facility>"
/// A7: "... (<dd/mm/yyyy> - <dd/mm/yyyy>)"
/// Column A: "- <drug name>" marker rows opening each drug section
/// Section rows: B = drug source, D = unit of measure, H..N = stock movement
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub province_cell: CellAddress,
    pub facility_cell: CellAddress,
    pub period_cell: CellAddress,
    pub marker_col: u32,
    pub source_col: u32,
    pub uom_col: u32,
    pub first_movement_col: u32,
}

impl SheetLayout {
    pub fn with_sheet_name(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Self::default()
        }
    }

    /// Column holding the `index`-th movement field (0 = opening stock)
    pub fn movement_col(&self, index: usize) -> u32 {
        // index < MOVEMENT_COLUMNS
        self.first_movement_col + index as u32
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            province_cell: CellAddress::new(0, 0),
            facility_cell: CellAddress::new(1, 0),
            period_cell: CellAddress::new(6, 0),
            marker_col: 0,
            source_col: 1,
            uom_col: 3,
            first_movement_col: 7,
        }
    }
}
