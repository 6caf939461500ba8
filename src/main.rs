use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use drug_stock_report::app;
use drug_stock_report::config::{Config, DEFAULT_OUTPUT_DIR, DEFAULT_SHEET_NAME};
use drug_stock_report::export::ReportFormat;

#[derive(Parser)]
#[command(name = "drug-stock-report")]
#[command(
    about = "Consolidate HMED drug stock report workbooks into monthly and quarterly reports",
    long_about = None
)]
struct Cli {
    /// HMED stock report files to process (.xlsx, .xls, .ods)
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Directory receiving monthly_all_data and quarterly_all_data
    #[arg(long, env = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Staging SQLite URL (default: temporary database removed after the run)
    #[arg(long, env = "STAGING_DATABASE_URL")]
    database_url: Option<String>,

    /// Name of the report sheet in each workbook
    #[arg(long, env = "SHEET_NAME", default_value = DEFAULT_SHEET_NAME)]
    sheet: String,

    /// Output format for the aggregate reports
    #[arg(long, env = "REPORT_FORMAT", value_enum, default_value_t = ReportFormat::Xlsx)]
    format: ReportFormat,

    /// Skip files that fail to load instead of aborting the run
    #[arg(long)]
    continue_on_error: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            input_files: cli.files,
            output_dir: cli.output_dir,
            database_url: cli.database_url,
            sheet_name: cli.sheet,
            format: cli.format,
            continue_on_error: cli.continue_on_error,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,drug_stock_report=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from(Cli::parse());
    info!("Starting drug stock report with config: {:?}", config);

    let start_time = Instant::now();
    let pb = ProgressBar::new(config.input_files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let summary = match app::run(&config, &pb).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Run aborted: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Done in {:.2}s: {} files loaded, {} records, {} reports written",
        start_time.elapsed().as_secs_f64(),
        summary.ingest.files_loaded,
        summary.ingest.records_inserted,
        summary.reports.len()
    );

    if summary.has_failures() {
        return Err(format!(
            "{} of {} files failed to load",
            summary.ingest.files_failed.len(),
            config.input_files.len()
        )
        .into());
    }

    Ok(())
}
