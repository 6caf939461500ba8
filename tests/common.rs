// Shared fixtures: stock report workbooks written to temp directories and
// in-memory staging stores.
#![allow(dead_code)]

use drug_stock_report::db::StagingStore;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// Row of a fixture report, starting at sheet row 10
#[derive(Debug, Clone)]
pub enum FixtureRow {
    Marker(&'static str),
    Data {
        source: &'static str,
        uom: &'static str,
        values: [i64; 7],
    },
    /// Data row with the given movement column (0..7) left empty
    MissingValue {
        source: &'static str,
        uom: &'static str,
        missing: usize,
    },
    Blank,
}

pub fn marker(name: &'static str) -> FixtureRow {
    FixtureRow::Marker(name)
}

pub fn data(source: &'static str, uom: &'static str, values: [i64; 7]) -> FixtureRow {
    FixtureRow::Data {
        source,
        uom,
        values,
    }
}

#[derive(Debug, Clone)]
pub struct ReportFixture {
    pub sheet_name: &'static str,
    pub province_cell: String,
    pub facility_cell: String,
    pub period_cell: String,
    pub rows: Vec<FixtureRow>,
}

impl ReportFixture {
    pub fn new(province: &str, facility: &str, window: &str) -> Self {
        Self {
            sheet_name: "Sheet1",
            province_cell: format!("Tỉnh/Thành phố: {province}"),
            facility_cell: format!("Cơ sở: {facility}"),
            period_cell: format!("BÁO CÁO SỬ DỤNG THUỐC ({window})"),
            rows: Vec::new(),
        }
    }

    pub fn rows(mut self, rows: Vec<FixtureRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Write the fixture as an .xlsx workbook in `dir`
    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(self.sheet_name).unwrap();

        sheet.write_string(0, 0, self.province_cell.as_str()).unwrap();
        sheet.write_string(1, 0, self.facility_cell.as_str()).unwrap();
        sheet.write_string(6, 0, self.period_cell.as_str()).unwrap();

        // Column titles on row 9
        let titles = [
            "STT", "Nguồn", "Hàm lượng", "ĐVT", "", "", "", "Tồn đầu kỳ", "Nhập định kỳ",
            "Nhập khác", "Xuất BN", "Xuất điều chuyển", "Hư hao", "Tồn cuối kỳ",
        ];
        for (col, title) in titles.iter().enumerate() {
            if !title.is_empty() {
                sheet.write_string(8, col as u16, *title).unwrap();
            }
        }

        for (idx, row) in self.rows.iter().enumerate() {
            let r = 9 + idx as u32;
            match row {
                FixtureRow::Marker(name) => {
                    sheet.write_string(r, 0, format!("- {name}")).unwrap();
                }
                FixtureRow::Data {
                    source,
                    uom,
                    values,
                } => {
                    sheet.write_string(r, 1, *source).unwrap();
                    sheet.write_string(r, 3, *uom).unwrap();
                    for (offset, value) in values.iter().enumerate() {
                        sheet.write_number(r, 7 + offset as u16, *value as f64).unwrap();
                    }
                }
                FixtureRow::MissingValue {
                    source,
                    uom,
                    missing,
                } => {
                    sheet.write_string(r, 1, *source).unwrap();
                    sheet.write_string(r, 3, *uom).unwrap();
                    for offset in (0..7).filter(|o| o != missing) {
                        sheet.write_number(r, 7 + offset as u16, 1.0).unwrap();
                    }
                }
                FixtureRow::Blank => {}
            }
        }

        workbook.save(&path).unwrap();
        path
    }
}

/// Fresh in-memory staging store with the schema applied
pub async fn memory_store() -> StagingStore {
    StagingStore::open("sqlite::memory:")
        .await
        .expect("Failed to open in-memory staging store")
}
