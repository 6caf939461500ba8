use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tempfile::TempDir;
use tracing::{debug, info, instrument};

use crate::db::DbError;

/// Staging database shared by every file of one run
///
/// Created and migrated once before any file is loaded, written by each file,
/// queried for the reports, then closed. A temporary store lives in its own
/// directory which is removed on close.
pub struct StagingStore {
    pool: SqlitePool,
    temp_dir: Option<TempDir>,
}

impl StagingStore {
    /// Throw-away store in a fresh temporary directory
    pub async fn temporary() -> Result<Self, DbError> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("staging.db");
        info!("Creating temporary staging database at {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        Self::connect_with(options, Some(temp_dir)).await
    }

    /// Store at an explicit SQLite URL (e.g. "sqlite://staging.db" or "sqlite::memory:")
    ///
    /// Rows left over from a previous run are removed.
    pub async fn open(database_url: &str) -> Result<Self, DbError> {
        info!("Opening staging database {}", database_url);
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let store = Self::connect_with(options, None).await?;
        store.reset().await?;
        Ok(store)
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        temp_dir: Option<TempDir>,
    ) -> Result<Self, DbError> {
        // A single long-lived connection keeps in-memory databases alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        debug!("Running staging migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool, temp_dir })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM drug_stock")
            .execute(&self.pool)
            .await?;
        if result.rows_affected() > 0 {
            info!("Cleared {} stale staging rows", result.rows_affected());
        }
        Ok(())
    }

    /// Close the pool and remove the temporary directory, if any
    pub async fn close(self) -> Result<(), DbError> {
        self.pool.close().await;
        if let Some(temp_dir) = self.temp_dir {
            debug!("Removing {}", temp_dir.path().display());
            temp_dir.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temporary_store_is_removed_on_close() {
        let store = StagingStore::temporary().await.unwrap();
        let dir = store.temp_dir.as_ref().unwrap().path().to_path_buf();
        assert!(dir.join("staging.db").exists());

        store.close().await.unwrap();
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_in_memory_store_has_schema() {
        let store = StagingStore::open("sqlite::memory:").await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drug_stock")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
        store.close().await.unwrap();
    }
}
