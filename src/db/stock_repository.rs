use sqlx::error::ErrorKind;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use crate::db::DbError;
use crate::extract::InventoryRecord;

#[derive(Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one file's records in a single transaction
    ///
    /// If any record is rejected nothing from the batch is kept. The absent
    /// period column is stored as 0.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn insert_records(&self, records: &[InventoryRecord]) -> Result<usize, DbError> {
        debug!("Beginning transaction to insert {} records", records.len());
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO drug_stock (
                    province_name, facility_name, drug_name, drug_source, drug_uom,
                    report_year, is_monthly, report_month, report_quarter,
                    ton_dau_ky, nhap_dinh_ky, nhap_khac, xuat_cho_benh_nhan_trong_ky,
                    xuat_dieu_chuyen_trong_ky, hu_hao, ton_cuoi_ky
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.province_name)
            .bind(&record.facility_name)
            .bind(&record.drug_name)
            .bind(&record.drug_source)
            .bind(&record.drug_uom)
            .bind(record.report_year)
            .bind(i32::from(record.is_monthly()))
            .bind(i64::from(record.report_month().unwrap_or(0)))
            .bind(i64::from(record.report_quarter().unwrap_or(0)))
            .bind(record.movement.ton_dau_ky)
            .bind(record.movement.nhap_dinh_ky)
            .bind(record.movement.nhap_khac)
            .bind(record.movement.xuat_cho_benh_nhan_trong_ky)
            .bind(record.movement.xuat_dieu_chuyen_trong_ky)
            .bind(record.movement.hu_hao)
            .bind(record.movement.ton_cuoi_ky)
            .execute(&mut *tx)
            .await
            .map_err(|e| constraint_error(e, record))?;
        }

        tx.commit().await?;
        info!("Inserted {} records", records.len());
        Ok(records.len())
    }

    /// Number of staged rows
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM drug_stock")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Turn CHECK / NOT NULL failures into a violation pointing at the sheet row
fn constraint_error(err: sqlx::Error, record: &InventoryRecord) -> DbError {
    match err {
        sqlx::Error::Database(db_err)
            if matches!(
                db_err.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation
            ) =>
        {
            DbError::ConstraintViolation {
                row: record.source_row,
                msg: format!(
                    "{} (drug '{}', source '{}', year {})",
                    db_err.message(),
                    record.drug_name,
                    record.drug_source,
                    record.report_year
                ),
            }
        }
        other => DbError::SqlxError(other),
    }
}
