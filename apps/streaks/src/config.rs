//! Application configuration from command line flags and environment variables.

use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, ValueEnum};

use crate::models::Window;
use crate::services::{AnalysisSettings, RecordQuery};

/// Default values used when neither a flag nor a variable is set.
pub mod defaults {
    /// Streaks shorter than this are not reported.
    pub const MIN_STREAK_LENGTH: usize = 3;
    /// Window length when `STREAKS_FROM` is not set.
    pub const WINDOW_DAYS: i64 = 14;
    pub const DB_MAX_CONNECTIONS: u32 = 4;
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[value(alias = "txt")]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw settings. Every flag falls back to its environment variable.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Window start, YYYY-MM-DD (midnight UTC) or RFC 3339 [default: 14 days before --to]
    #[arg(long, env = "STREAKS_FROM")]
    pub from: Option<String>,

    /// Window end, inclusive [default: now]
    #[arg(long, env = "STREAKS_TO")]
    pub to: Option<String>,

    /// Only analyze job names starting with this prefix
    #[arg(long, env = "STREAKS_NAME_PREFIX", default_value = "")]
    pub name_prefix: String,

    /// Minimum number of consecutive failures to report
    #[arg(long, env = "STREAKS_MIN_LENGTH", default_value_t = defaults::MIN_STREAK_LENGTH)]
    pub min_streak_length: usize,

    /// Read records from a JSON export instead of the database
    #[arg(long, env = "STREAKS_SOURCE_FILE")]
    pub source_file: Option<PathBuf>,

    /// PostgreSQL connection string (required without --source-file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database connection pool size
    #[arg(long, env = "STREAKS_DB_MAX_CONNECTIONS", default_value_t = defaults::DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,

    /// Output format
    #[arg(long, env = "STREAKS_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Hide job names without reportable streaks (`--only-alerting false` overrides the env)
    #[arg(
        long,
        env = "STREAKS_ONLY_ALERTING",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub only_alerting: bool,
}

impl Default for ConfigArgs {
    fn default() -> Self {
        ConfigArgs {
            from: None,
            to: None,
            name_prefix: String::new(),
            min_streak_length: defaults::MIN_STREAK_LENGTH,
            source_file: None,
            database_url: None,
            db_max_connections: defaults::DB_MAX_CONNECTIONS,
            format: OutputFormat::Text,
            only_alerting: false,
        }
    }
}

/// Where job runs and failed tests are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSettings {
    /// PostgreSQL database holding the `job_runs` and `test_results` tables.
    Database {
        url: String,
        max_connections: u32,
    },
    /// JSON export with `jobs` and `tests` arrays.
    File(PathBuf),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Inclusive time window to analyze
    pub window: Window,
    /// Only job names starting with this prefix are analyzed (empty = all)
    pub name_prefix: String,
    /// Minimum streak length that gets reported
    pub min_streak_length: usize,
    /// Record source
    pub source: SourceSettings,
    /// Report output format
    pub format: OutputFormat,
    /// Omit job names without reportable streaks from text output
    pub only_alerting: bool,
}

/// Empty values count as unset.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Validate parsed flags and resolve defaults.
    ///
    /// Environment variables (each also settable by the matching flag):
    /// - `STREAKS_FROM`: Window start, `YYYY-MM-DD` or RFC 3339 (default: 14 days before `STREAKS_TO`)
    /// - `STREAKS_TO`: Window end, inclusive (default: now)
    /// - `STREAKS_NAME_PREFIX`: Job name prefix filter (default: all jobs)
    /// - `STREAKS_MIN_LENGTH`: Minimum reportable streak length (default: 3)
    /// - `STREAKS_SOURCE_FILE`: JSON export to read instead of the database
    /// - `DATABASE_URL`: PostgreSQL connection string (required without a source file)
    /// - `STREAKS_DB_MAX_CONNECTIONS`: Connection pool size (default: 4)
    /// - `STREAKS_FORMAT`: `text` or `json` (default: text)
    /// - `STREAKS_ONLY_ALERTING`: Hide job names without streaks (default: false)
    pub fn from_args(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let to = match non_blank(&args.to) {
            Some(value) => parse_timestamp("STREAKS_TO", value)?,
            None => Utc::now(),
        };
        let from = match non_blank(&args.from) {
            Some(value) => parse_timestamp("STREAKS_FROM", value)?,
            None => to - Duration::days(defaults::WINDOW_DAYS),
        };
        let window = Window::new(from, to).ok_or(ConfigError::InvalidValue(
            "STREAKS_FROM must not be later than STREAKS_TO",
        ))?;

        if args.min_streak_length == 0 {
            return Err(ConfigError::InvalidValue(
                "STREAKS_MIN_LENGTH must be at least 1",
            ));
        }

        let source = match &args.source_file {
            Some(path) if !path.as_os_str().is_empty() => SourceSettings::File(path.clone()),
            _ => {
                let url = non_blank(&args.database_url)
                    .ok_or(ConfigError::MissingEnvVar("DATABASE_URL"))?;
                SourceSettings::Database {
                    url: url.to_string(),
                    max_connections: args.db_max_connections,
                }
            }
        };

        Ok(Config {
            window,
            name_prefix: args.name_prefix.clone(),
            min_streak_length: args.min_streak_length,
            source,
            format: args.format,
            only_alerting: args.only_alerting,
        })
    }

    /// Ingestion parameters for the configured window and prefix.
    pub fn record_query(&self) -> RecordQuery {
        RecordQuery::new(self.window, self.name_prefix.clone())
    }

    /// Detector parameters.
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            min_streak_length: self.min_streak_length,
        }
    }
}

/// Parse a window bound.
///
/// A bare date means midnight UTC of that day, so `to = 2024-03-03` ends the
/// window at the first instant of March 3rd.
pub fn parse_timestamp(var: &'static str, value: &str) -> Result<DateTime<Utc>, ConfigError> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ConfigError::InvalidTimestamp {
            var,
            value: value.to_string(),
        })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Invalid timestamp for {var}: '{value}' (expected YYYY-MM-DD or RFC 3339)")]
    InvalidTimestamp { var: &'static str, value: String },
}
