//! ci-streaks - Main entry point.
//!
//! Fetches one window of CI records, reports failure streaks on stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ci_streaks::config::{Config, ConfigArgs, SourceSettings};
use ci_streaks::db::DbPool;
use ci_streaks::error::AppResult;
use ci_streaks::models::AnalysisReport;
use ci_streaks::services::{self, JsonFileSource, RecordSource};

/// Report streaks of consecutive CI job failures.
///
/// Every flag falls back to its environment variable (also read from `.env`).
#[derive(Debug, Parser)]
#[command(name = "ci-streaks", version)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

async fn fetch_and_analyze(config: &Config) -> AppResult<AnalysisReport> {
    let source: Box<dyn RecordSource> = match &config.source {
        SourceSettings::Database {
            url,
            max_connections,
        } => Box::new(DbPool::new(url, *max_connections).await?),
        SourceSettings::File(path) => {
            info!("Reading records from {}", path.display());
            Box::new(JsonFileSource::new(path))
        }
    };

    services::run_analysis(
        source.as_ref(),
        &config.record_query(),
        &config.analysis_settings(),
    )
    .await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_args(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("Set --database-url or --source-file (see --help)");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Analyzing {} to {} (prefix '{}', threshold {})",
        config.window.from, config.window.to, config.name_prefix, config.min_streak_length
    );

    let report = match fetch_and_analyze(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if report.is_empty() {
        info!("No job runs found in the window");
    }

    match services::render(&report, config.format, config.only_alerting) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to render report: {}", e);
            ExitCode::FAILURE
        }
    }
}
