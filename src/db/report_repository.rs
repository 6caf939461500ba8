use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{AggregateRow, DbError, Periodicity};

const MONTHLY_QUERY: &str = r#"
    SELECT province_name, facility_name, drug_name, drug_source, drug_uom, report_year,
           report_month AS period,
           SUM(ton_dau_ky) AS ton_dau_ky,
           SUM(nhap_dinh_ky) AS nhap_dinh_ky,
           SUM(nhap_khac) AS nhap_khac,
           SUM(xuat_cho_benh_nhan_trong_ky) AS xuat_cho_benh_nhan_trong_ky,
           SUM(xuat_dieu_chuyen_trong_ky) AS xuat_dieu_chuyen_trong_ky,
           SUM(hu_hao) AS hu_hao,
           SUM(ton_cuoi_ky) AS ton_cuoi_ky
    FROM drug_stock
    WHERE is_monthly = 1
    GROUP BY province_name, facility_name, report_year, report_month,
             drug_name, drug_source, drug_uom
    ORDER BY province_name, facility_name, report_year, report_month,
             drug_source, drug_name, drug_uom ASC
"#;

const QUARTERLY_QUERY: &str = r#"
    SELECT province_name, facility_name, drug_name, drug_source, drug_uom, report_year,
           report_quarter AS period,
           SUM(ton_dau_ky) AS ton_dau_ky,
           SUM(nhap_dinh_ky) AS nhap_dinh_ky,
           SUM(nhap_khac) AS nhap_khac,
           SUM(xuat_cho_benh_nhan_trong_ky) AS xuat_cho_benh_nhan_trong_ky,
           SUM(xuat_dieu_chuyen_trong_ky) AS xuat_dieu_chuyen_trong_ky,
           SUM(hu_hao) AS hu_hao,
           SUM(ton_cuoi_ky) AS ton_cuoi_ky
    FROM drug_stock
    WHERE is_monthly = 0
    GROUP BY province_name, facility_name, report_year, report_quarter,
             drug_name, drug_source, drug_uom
    ORDER BY province_name, facility_name, report_year, report_quarter,
             drug_source, drug_name, drug_uom ASC
"#;

/// Grouped-sum views over the staging table
#[derive(Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sum stock movement per province, facility, year, period, drug, source and unit
    #[instrument(skip(self))]
    pub async fn aggregate(&self, periodicity: Periodicity) -> Result<Vec<AggregateRow>, DbError> {
        let query = match periodicity {
            Periodicity::Monthly => MONTHLY_QUERY,
            Periodicity::Quarterly => QUARTERLY_QUERY,
        };

        let rows = sqlx::query_as::<_, AggregateRow>(query)
            .fetch_all(&self.pool)
            .await?;

        debug!("{:?} aggregate has {} rows", periodicity, rows.len());
        Ok(rows)
    }
}
