pub mod ingest_service;
pub mod report_service;

pub use ingest_service::{IngestError, IngestService, IngestSummary};
pub use report_service::{ReportError, ReportOutput, ReportService};
