//! In-process record sources backed by a [`RecordExport`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{FailedTest, JobRun, RecordExport, Window};

use super::ingest::{RecordQuery, RecordSource};

/// Apply the window and prefix filters, then order by `(started_at, id)`.
fn select_job_runs(export: &RecordExport, query: &RecordQuery) -> Vec<JobRun> {
    let mut runs: Vec<JobRun> = export
        .jobs
        .iter()
        .filter(|record| query.window.contains(record.started_at) && query.matches_name(&record.name))
        .cloned()
        .map(JobRun::from)
        .collect();

    // Stable sort, rows with equal keys keep export order
    runs.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.id.cmp(&b.id)));
    runs
}

fn select_failed_tests(export: &RecordExport, window: &Window) -> Vec<FailedTest> {
    export
        .tests
        .iter()
        .filter(|record| record.is_failed() && window.contains(record.timestamp))
        .cloned()
        .map(FailedTest::from)
        .collect()
}

/// Source over rows already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    export: RecordExport,
}

impl StaticSource {
    pub fn new(export: RecordExport) -> Self {
        StaticSource { export }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_job_runs(&self, query: &RecordQuery) -> AppResult<Vec<JobRun>> {
        Ok(select_job_runs(&self.export, query))
    }

    async fn fetch_failed_tests(&self, window: &Window) -> AppResult<Vec<FailedTest>> {
        Ok(select_failed_tests(&self.export, window))
    }
}

/// Source reading a JSON export from disk.
///
/// The file is read once, on the first fetch, so both record sets come from
/// the same snapshot.
#[derive(Debug)]
pub struct JsonFileSource {
    path: PathBuf,
    export: OnceCell<RecordExport>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource {
            path: path.into(),
            export: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn export(&self) -> AppResult<&RecordExport> {
        self.export
            .get_or_try_init(|| async {
                let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                    AppError::Io(format!("Failed to read {}: {}", self.path.display(), e))
                })?;
                let export: RecordExport = serde_json::from_str(&content)?;
                debug!(
                    "Loaded {} job rows and {} test rows from {}",
                    export.jobs.len(),
                    export.tests.len(),
                    self.path.display()
                );
                Ok::<_, AppError>(export)
            })
            .await
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch_job_runs(&self, query: &RecordQuery) -> AppResult<Vec<JobRun>> {
        Ok(select_job_runs(self.export().await?, query))
    }

    async fn fetch_failed_tests(&self, window: &Window) -> AppResult<Vec<FailedTest>> {
        Ok(select_failed_tests(self.export().await?, window))
    }
}
