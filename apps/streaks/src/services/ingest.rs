//! Record ingestion contract.
//!
//! A [`RecordSource`] hands over complete, materialized result sets. The
//! analysis never sees a partially fetched window: [`fetch_window`] returns
//! both record sets or an error.

use async_trait::async_trait;
use tracing::info;

use crate::error::AppResult;
use crate::models::{FailedTest, JobRun, Window};

/// Parameters for one ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub window: Window,
    /// Job name prefix; empty matches every job
    pub name_prefix: String,
}

impl RecordQuery {
    pub fn new(window: Window, name_prefix: impl Into<String>) -> Self {
        RecordQuery {
            window,
            name_prefix: name_prefix.into(),
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        name.starts_with(&self.name_prefix)
    }
}

/// Supplier of job runs and failed tests.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Job runs started inside the window whose name matches the prefix,
    /// ascending by `started_at`.
    async fn fetch_job_runs(&self, query: &RecordQuery) -> AppResult<Vec<JobRun>>;

    /// Tests with status exactly `failed` recorded inside the window.
    async fn fetch_failed_tests(&self, window: &Window) -> AppResult<Vec<FailedTest>>;
}

/// Both record sets for one window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestedRecords {
    pub runs: Vec<JobRun>,
    pub tests: Vec<FailedTest>,
}

/// Fetch both record sets. Any source error aborts the whole fetch.
pub async fn fetch_window<S>(source: &S, query: &RecordQuery) -> AppResult<IngestedRecords>
where
    S: RecordSource + ?Sized,
{
    let (runs, tests) = tokio::try_join!(
        source.fetch_job_runs(query),
        source.fetch_failed_tests(&query.window)
    )?;

    info!(
        "Fetched {} job runs and {} failed tests ({} to {}, prefix '{}')",
        runs.len(),
        tests.len(),
        query.window.from,
        query.window.to,
        query.name_prefix
    );

    Ok(IngestedRecords { runs, tests })
}
