use calamine::{Data, Range};
use std::ops::RangeInclusive;

/// Read-only view over one worksheet
///
/// All positions are absolute and zero-based, so "A7" is `(6, 0)` no matter
/// where the used range of the worksheet begins.
#[derive(Debug, Clone)]
pub struct Sheet {
    range: Range<Data>,
}

impl Sheet {
    pub fn new(range: Range<Data>) -> Self {
        Self { range }
    }

    /// Get a non-empty cell value
    pub fn cell(&self, row: u32, col: u32) -> Option<&Data> {
        self.range
            .get_value((row, col))
            .filter(|value| !matches!(value, Data::Empty))
    }

    /// Get a cell converted to text, the way a user reads it
    pub fn text(&self, row: u32, col: u32) -> Option<String> {
        self.cell(row, col).map(|value| match value {
            Data::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Absolute indices of every row in the used range, top to bottom
    pub fn rows(&self) -> RangeInclusive<u32> {
        match (self.range.start(), self.range.end()) {
            (Some((first, _)), Some((last, _))) => first..=last,
            // Empty sheet
            _ => RangeInclusive::new(1, 0),
        }
    }
}

/// Build a sheet from rows of cells starting at A1 (tests only)
#[cfg(test)]
pub(crate) fn sheet_from_rows(rows: Vec<Vec<Data>>) -> Sheet {
    let height = rows.len() as u32;
    let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
    if height == 0 || width == 0 {
        return Sheet::new(Range::empty());
    }

    let mut range = Range::new((0, 0), (height - 1, width - 1));
    for (row_idx, row) in rows.into_iter().enumerate() {
        for (col_idx, value) in row.into_iter().enumerate() {
            range.set_value((row_idx as u32, col_idx as u32), value);
        }
    }
    Sheet::new(range)
}
