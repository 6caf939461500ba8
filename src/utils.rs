/// Shared utility functions for addressing spreadsheet cells
///
/// Convert a zero-based column index into spreadsheet column letters
///
/// Columns follow the usual A..Z, AA..AZ, ... sequence.
///
/// # Examples
///
/// ```
/// use drug_stock_report::utils::column_name;
///
/// assert_eq!(column_name(0), "A");
/// assert_eq!(column_name(13), "N");
/// assert_eq!(column_name(26), "AA");
/// ```
pub fn column_name(col: u32) -> String {
    let mut remaining = col + 1;
    let mut letters = Vec::new();

    while remaining > 0 {
        let offset = (remaining - 1) % 26;
        // offset < 26, always fits in a byte
        letters.push(char::from(b'A' + offset as u8));
        remaining = (remaining - 1) / 26;
    }

    letters.iter().rev().collect()
}

/// Format a zero-based (row, col) position as an A1-style reference ("H12")
///
/// # Examples
///
/// ```
/// use drug_stock_report::utils::cell_ref;
///
/// assert_eq!(cell_ref(0, 0), "A1");
/// assert_eq!(cell_ref(6, 0), "A7");
/// assert_eq!(cell_ref(11, 7), "H12");
/// ```
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", column_name(col), row + 1)
}
