use calamine::Data;

use crate::extract::error::ExtractError;
use crate::extract::header_parser::{HeaderInfo, ReportPeriod};
use crate::extract::layout::{SheetLayout, MOVEMENT_COLUMNS};
use crate::extract::row_segmenter::RawStockRow;
use crate::utils::cell_ref;

/// Stock movement columns in sheet order, named as in the staging table
pub const MOVEMENT_FIELDS: [&str; MOVEMENT_COLUMNS] = [
    "ton_dau_ky",
    "nhap_dinh_ky",
    "nhap_khac",
    "xuat_cho_benh_nhan_trong_ky",
    "xuat_dieu_chuyen_trong_ky",
    "hu_hao",
    "ton_cuoi_ky",
];

/// Stock movement of one drug/source/unit over the report period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockMovement {
    /// Opening stock
    pub ton_dau_ky: i64,
    /// Periodic receipts
    pub nhap_dinh_ky: i64,
    /// Other receipts
    pub nhap_khac: i64,
    /// Dispensed to patients
    pub xuat_cho_benh_nhan_trong_ky: i64,
    /// Transferred out
    pub xuat_dieu_chuyen_trong_ky: i64,
    /// Wastage
    pub hu_hao: i64,
    /// Closing stock
    pub ton_cuoi_ky: i64,
}

impl StockMovement {
    pub fn from_values(values: [i64; MOVEMENT_COLUMNS]) -> Self {
        let [ton_dau_ky, nhap_dinh_ky, nhap_khac, xuat_cho_benh_nhan_trong_ky, xuat_dieu_chuyen_trong_ky, hu_hao, ton_cuoi_ky] =
            values;
        Self {
            ton_dau_ky,
            nhap_dinh_ky,
            nhap_khac,
            xuat_cho_benh_nhan_trong_ky,
            xuat_dieu_chuyen_trong_ky,
            hu_hao,
            ton_cuoi_ky,
        }
    }

    pub fn values(&self) -> [i64; MOVEMENT_COLUMNS] {
        [
            self.ton_dau_ky,
            self.nhap_dinh_ky,
            self.nhap_khac,
            self.xuat_cho_benh_nhan_trong_ky,
            self.xuat_dieu_chuyen_trong_ky,
            self.hu_hao,
            self.ton_cuoi_ky,
        ]
    }
}

/// One normalized stock report row, ready for the staging store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    /// One-based sheet row the record was read from
    pub source_row: u32,
    pub province_name: String,
    pub facility_name: String,
    pub drug_name: String,
    pub drug_source: String,
    pub drug_uom: String,
    pub report_year: i32,
    pub period: ReportPeriod,
    pub movement: StockMovement,
}

impl InventoryRecord {
    pub fn is_monthly(&self) -> bool {
        self.period.is_monthly()
    }

    pub fn report_month(&self) -> Option<u32> {
        self.period.month()
    }

    pub fn report_quarter(&self) -> Option<u32> {
        self.period.quarter()
    }
}

/// Merge header metadata into a raw section row
pub fn normalize_row(
    header: &HeaderInfo,
    raw: &RawStockRow<'_>,
    layout: &SheetLayout,
) -> Result<InventoryRecord, ExtractError> {
    let drug_source = cell_text(raw.drug_source);
    let drug_uom = raw
        .drug_uom
        .map(cell_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing(raw.row, layout.uom_col, "unit of measure"))?;

    let mut values = [0i64; MOVEMENT_COLUMNS];
    for (index, value) in values.iter_mut().enumerate() {
        let col = layout.movement_col(index);
        *value = parse_quantity(raw.movements[index], raw.row, col, MOVEMENT_FIELDS[index])?;
    }

    Ok(InventoryRecord {
        source_row: raw.row + 1,
        province_name: header.province_name.clone(),
        facility_name: header.facility_name.clone(),
        drug_name: raw.drug_name.to_string(),
        drug_source,
        drug_uom,
        report_year: header.period_year(),
        period: header.period,
        movement: StockMovement::from_values(values),
    })
}

fn cell_text(value: &Data) -> String {
    match value {
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn missing(row: u32, col: u32, field: &'static str) -> ExtractError {
    ExtractError::MissingValue {
        row: row + 1,
        cell: cell_ref(row, col),
        field,
    }
}

/// Read an integer quantity; whole floats and integer text are accepted as-is
fn parse_quantity(
    value: Option<&Data>,
    row: u32,
    col: u32,
    field: &'static str,
) -> Result<i64, ExtractError> {
    let invalid = |msg: String| ExtractError::Format {
        cell: cell_ref(row, col),
        msg,
    };

    match value {
        None => Err(missing(row, col, field)),
        Some(Data::Int(i)) => Ok(*i),
        Some(Data::Float(f)) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Ok(*f as i64)
            } else {
                Err(invalid(format!("{field} must be a whole number, got {f}")))
            }
        }
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(missing(row, col, field));
            }
            trimmed
                .parse::<i64>()
                .map_err(|_| invalid(format!("cannot parse {field} value: {s:?}")))
        }
        Some(other) => Err(invalid(format!("expected number for {field}, got: {other:?}"))),
    }
}
