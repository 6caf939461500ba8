use serde::Serialize;
use sqlx::FromRow;

/// Which aggregate view of the staging table to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Periodicity {
    Monthly,
    Quarterly,
}

impl Periodicity {
    pub const ALL: [Periodicity; 2] = [Periodicity::Monthly, Periodicity::Quarterly];

    /// Output file stem
    pub fn report_name(&self) -> &'static str {
        match self {
            Periodicity::Monthly => "monthly_all_data",
            Periodicity::Quarterly => "quarterly_all_data",
        }
    }

    /// Header of the period column in exported reports
    pub fn period_header(&self) -> &'static str {
        match self {
            Periodicity::Monthly => "Thang",
            Periodicity::Quarterly => "Quy",
        }
    }
}

// Field order matches the exported column order
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AggregateRow {
    pub province_name: String,
    pub facility_name: String,
    pub drug_name: String,
    pub drug_source: String,
    pub drug_uom: Option<String>,
    pub report_year: i32,
    /// Month for the monthly view, quarter for the quarterly one
    pub period: i32,
    pub ton_dau_ky: i64,
    pub nhap_dinh_ky: i64,
    pub nhap_khac: i64,
    pub xuat_cho_benh_nhan_trong_ky: i64,
    pub xuat_dieu_chuyen_trong_ky: i64,
    pub hu_hao: i64,
    pub ton_cuoi_ky: i64,
}
