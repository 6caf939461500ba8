use calamine::{open_workbook_auto, Reader};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::extract::error::ExtractError;
use crate::extract::layout::SheetLayout;
use crate::extract::record::InventoryRecord;
use crate::extract::sheet::Sheet;
use crate::extract::extract_records;

/// Reader for one HMED stock report workbook (.xlsx, .xls, .xlsb or .ods)
pub struct StockReportReader {
    workbook_path: PathBuf,
    layout: SheetLayout,
}

impl StockReportReader {
    pub fn new(workbook_path: impl Into<PathBuf>, layout: SheetLayout) -> Self {
        Self {
            workbook_path: workbook_path.into(),
            layout,
        }
    }

    /// Load the report sheet into memory
    ///
    /// This is synchronous, caller should use spawn_blocking
    pub fn load_sheet(&self) -> Result<Sheet, ExtractError> {
        let mut workbook = open_workbook_auto(&self.workbook_path)
            .map_err(|e| ExtractError::WorkbookOpen(e.to_string()))?;

        let sheet_name = self.layout.sheet_name.as_str();
        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(ExtractError::SheetNotFound(sheet_name.to_string()));
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ExtractError::SheetRead {
                sheet: sheet_name.to_string(),
                msg: e.to_string(),
            })?;

        debug!(
            "Loaded sheet {} from {} ({:?} cells)",
            sheet_name,
            self.workbook_path.display(),
            range.get_size()
        );
        Ok(Sheet::new(range))
    }

    /// Extract every inventory record of the workbook, or nothing on error
    pub fn read_records(&self) -> Result<Vec<InventoryRecord>, ExtractError> {
        info!("Parsing stock report: {}", self.workbook_path.display());
        let sheet = self.load_sheet()?;
        let records = extract_records(&sheet, &self.layout)?;
        info!(
            "Extracted {} records from {}",
            records.len(),
            self.workbook_path.display()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_not_found() {
        let reader = StockReportReader::new("/nonexistent/report.xlsx", SheetLayout::default());
        assert!(matches!(
            reader.read_records(),
            Err(ExtractError::WorkbookOpen(_))
        ));
    }
}
