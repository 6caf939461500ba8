use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::{DbError, StagingStore};
use crate::services::{IngestError, IngestService, IngestSummary, ReportError, ReportOutput, ReportService};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Staging store error: {0}")]
    Store(#[from] DbError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ingest: IngestSummary,
    pub reports: Vec<ReportOutput>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.ingest.files_failed.is_empty()
    }
}

/// Load every input file, then write both aggregate reports
///
/// The staging store is created before the first file and closed after the
/// reports are written, also when loading fails.
pub async fn run(config: &Config, progress: &ProgressBar) -> Result<RunSummary, AppError> {
    info!(
        "Processing {} files into {}",
        config.input_files.len(),
        config.output_dir.display()
    );

    let store = match &config.database_url {
        Some(url) => StagingStore::open(url).await?,
        None => StagingStore::temporary().await?,
    };

    let result = load_and_report(&store, config, progress).await;

    if let Err(e) = store.close().await {
        warn!("Failed to tear down staging store: {}", e);
    }

    let summary = result?;
    for report in &summary.reports {
        info!(
            "{:?} report: {} rows -> {}",
            report.periodicity,
            report.rows,
            report.path.display()
        );
    }
    if summary.has_failures() {
        warn!(
            "{} files failed: {}",
            summary.ingest.files_failed.len(),
            summary.ingest.files_failed.join(", ")
        );
    }

    Ok(summary)
}

async fn load_and_report(
    store: &StagingStore,
    config: &Config,
    progress: &ProgressBar,
) -> Result<RunSummary, AppError> {
    let ingest_service = IngestService::new(store.pool().clone(), config.layout());
    let report_service = ReportService::new(store.pool().clone());

    let ingest = ingest_service
        .ingest_files(&config.input_files, config.continue_on_error, progress)
        .await?;

    let reports = report_service
        .export_all(&config.output_dir, config.format)
        .await?;

    Ok(RunSummary { ingest, reports })
}
