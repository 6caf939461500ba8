// Aggregate report writers
//
// Both reports share one column layout; only the period column header differs
// (Thang for months, Quy for quarters).

pub mod csv_writer;
pub mod xlsx_writer;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::db::{AggregateRow, Periodicity};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write xlsx report: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write csv report: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output file format for the aggregate reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Column headers of an aggregate report
pub fn column_headers(periodicity: Periodicity) -> [&'static str; 14] {
    [
        "Ten_tinh",
        "Ten_co_so",
        "Ten_thuoc",
        "Nguon_thuoc",
        "Don_vi_tinh",
        "Nam",
        periodicity.period_header(),
        "Ton_dau_ky",
        "Nhap_dinh_ky",
        "Nhap_khac",
        "Xuat_cho_benh_nhan_trong_ky",
        "Xuat_dieu_chuyen_trong_ky",
        "Hu_hao",
        "Ton_cuoi_ky",
    ]
}

/// Path of the report file for a periodicity inside `output_dir`
pub fn report_path(output_dir: &Path, periodicity: Periodicity, format: ReportFormat) -> PathBuf {
    output_dir.join(format!(
        "{}.{}",
        periodicity.report_name(),
        format.extension()
    ))
}

/// Write one aggregate report; an empty `rows` still produces a file with headers
pub fn write_report(
    output_dir: &Path,
    periodicity: Periodicity,
    rows: &[AggregateRow],
    format: ReportFormat,
) -> Result<PathBuf, ExportError> {
    let path = report_path(output_dir, periodicity, format);

    match format {
        ReportFormat::Xlsx => xlsx_writer::write_xlsx(&path, periodicity, rows)?,
        ReportFormat::Csv => csv_writer::write_csv(&path, periodicity, rows)?,
    }

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_paths() {
        let dir = Path::new("output");
        assert_eq!(
            report_path(dir, Periodicity::Monthly, ReportFormat::Xlsx),
            PathBuf::from("output/monthly_all_data.xlsx")
        );
        assert_eq!(
            report_path(dir, Periodicity::Quarterly, ReportFormat::Csv),
            PathBuf::from("output/quarterly_all_data.csv")
        );
    }

    #[test]
    fn test_period_column_header() {
        assert_eq!(column_headers(Periodicity::Monthly)[6], "Thang");
        assert_eq!(column_headers(Periodicity::Quarterly)[6], "Quy");
    }
}
