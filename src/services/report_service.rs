use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::db::{AggregateRow, DbError, Periodicity, ReportRepository};
use crate::export::{write_report, ExportError, ReportFormat};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// One written report file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutput {
    pub periodicity: Periodicity,
    pub path: PathBuf,
    pub rows: usize,
}

/// Builds the monthly and quarterly aggregate reports from the staging store
#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            report_repo: ReportRepository::new(pool),
        }
    }

    pub async fn aggregate(&self, periodicity: Periodicity) -> Result<Vec<AggregateRow>, ReportError> {
        Ok(self.report_repo.aggregate(periodicity).await?)
    }

    /// Write both reports into `output_dir`, even when a view has no rows
    #[instrument(skip(self), fields(output_dir = %output_dir.display()))]
    pub async fn export_all(
        &self,
        output_dir: &Path,
        format: ReportFormat,
    ) -> Result<Vec<ReportOutput>, ReportError> {
        std::fs::create_dir_all(output_dir).map_err(ExportError::from)?;

        let mut outputs = Vec::with_capacity(Periodicity::ALL.len());
        for periodicity in Periodicity::ALL {
            let rows = self.aggregate(periodicity).await?;
            let path = write_report(output_dir, periodicity, &rows, format)?;
            outputs.push(ReportOutput {
                periodicity,
                path,
                rows: rows.len(),
            });
        }

        info!("Exported {} reports to {}", outputs.len(), output_dir.display());
        Ok(outputs)
    }
}
