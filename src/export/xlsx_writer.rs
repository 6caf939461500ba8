use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use crate::db::{AggregateRow, Periodicity};
use crate::export::{column_headers, ExportError};

/// Write an aggregate report as a single-sheet workbook
pub fn write_xlsx(
    path: &Path,
    periodicity: Periodicity,
    rows: &[AggregateRow],
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1")?;

    let header_format = Format::new().set_bold();
    for (col, title) in column_headers(periodicity).iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, row.province_name.as_str())?;
        sheet.write_string(r, 1, row.facility_name.as_str())?;
        sheet.write_string(r, 2, row.drug_name.as_str())?;
        sheet.write_string(r, 3, row.drug_source.as_str())?;
        if let Some(uom) = &row.drug_uom {
            sheet.write_string(r, 4, uom.as_str())?;
        }
        sheet.write_number(r, 5, row.report_year)?;
        sheet.write_number(r, 6, row.period)?;

        let sums = [
            row.ton_dau_ky,
            row.nhap_dinh_ky,
            row.nhap_khac,
            row.xuat_cho_benh_nhan_trong_ky,
            row.xuat_dieu_chuyen_trong_ky,
            row.hu_hao,
            row.ton_cuoi_ky,
        ];
        for (offset, value) in sums.iter().enumerate() {
            sheet.write_number(r, 7 + offset as u16, *value as f64)?;
        }
    }

    sheet.autofit();
    workbook.save(path)?;
    Ok(())
}
