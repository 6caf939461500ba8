use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Failed to read sheet {sheet}: {msg}")]
    SheetRead { sheet: String, msg: String },

    #[error("Unexpected format in cell {cell}: {msg}")]
    Format { cell: String, msg: String },

    #[error("Missing {field} in cell {cell} (row {row})")]
    MissingValue {
        row: u32,
        cell: String,
        field: &'static str,
    },
}
