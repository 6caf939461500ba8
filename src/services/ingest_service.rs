use indicatif::ProgressBar;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::db::{DbError, StockRepository};
use crate::extract::{ExtractError, SheetLayout, StockReportReader};

/// Error types for loading one stock report file; every variant names the file
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("{path}: {source}")]
    Extract { path: String, source: ExtractError },

    #[error("{path}: {source}")]
    Store { path: String, source: DbError },

    #[error("{path}: extraction task failed: {source}")]
    Task {
        path: String,
        source: tokio::task::JoinError,
    },
}

/// Outcome of loading a batch of files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub files_loaded: usize,
    pub files_failed: Vec<String>,
    pub records_inserted: usize,
}

/// Loads stock report files into the staging store, one file at a time
#[derive(Clone)]
pub struct IngestService {
    stock_repo: StockRepository,
    layout: SheetLayout,
}

impl IngestService {
    pub fn new(pool: SqlitePool, layout: SheetLayout) -> Self {
        Self {
            stock_repo: StockRepository::new(pool),
            layout,
        }
    }

    /// Extract a file and insert its records
    ///
    /// The file is fully extracted before anything is written, and its records
    /// go in as one transaction, so a failing file leaves no rows behind.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_file(&self, path: &Path) -> Result<usize, IngestError> {
        let start_time = Instant::now();
        let display_path = path.display().to_string();

        let reader = StockReportReader::new(path, self.layout.clone());
        let records = tokio::task::spawn_blocking(move || reader.read_records())
            .await
            .map_err(|source| IngestError::Task {
                path: display_path.clone(),
                source,
            })?
            .map_err(|source| IngestError::Extract {
                path: display_path.clone(),
                source,
            })?;

        if records.is_empty() {
            warn!("No records found in {}", display_path);
        }

        let inserted = self
            .stock_repo
            .insert_records(&records)
            .await
            .map_err(|source| IngestError::Store {
                path: display_path.clone(),
                source,
            })?;

        info!(
            "Loaded {} records from {} in {:.2}s",
            inserted,
            display_path,
            start_time.elapsed().as_secs_f64()
        );
        Ok(inserted)
    }

    /// Load files in order
    ///
    /// With `continue_on_error` a failing file is logged and skipped; otherwise
    /// the first failure is returned and the remaining files are not touched.
    pub async fn ingest_files(
        &self,
        paths: &[PathBuf],
        continue_on_error: bool,
        progress: &ProgressBar,
    ) -> Result<IngestSummary, IngestError> {
        let mut summary = IngestSummary::default();

        for path in paths {
            progress.set_message(path.display().to_string());

            match self.ingest_file(path).await {
                Ok(inserted) => {
                    summary.files_loaded += 1;
                    summary.records_inserted += inserted;
                }
                Err(e) if continue_on_error => {
                    error!("Skipping file: {}", e);
                    summary.files_failed.push(path.display().to_string());
                }
                Err(e) => {
                    progress.abandon_with_message(format!("✗ {}", path.display()));
                    return Err(e);
                }
            }

            progress.inc(1);
        }

        progress.finish_with_message(format!(
            "✓ Loaded {} records from {} files",
            summary.records_inserted, summary.files_loaded
        ));
        Ok(summary)
    }
}
