use std::path::PathBuf;

use crate::export::ReportFormat;
use crate::extract::SheetLayout;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Clone)]
pub struct Config {
    pub input_files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Staging SQLite URL; a temporary database is used when unset
    pub database_url: Option<String>,
    pub sheet_name: String,
    pub format: ReportFormat,
    pub continue_on_error: bool,
}

impl Config {
    pub fn new(input_files: Vec<PathBuf>) -> Self {
        Self {
            input_files,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            database_url: None,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            format: ReportFormat::default(),
            continue_on_error: false,
        }
    }

    pub fn layout(&self) -> SheetLayout {
        SheetLayout::with_sheet_name(self.sheet_name.clone())
    }
}
