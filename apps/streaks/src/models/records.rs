//! Raw source rows as exported by the CI metrics store.
//!
//! These mirror the database rows: outcomes may be missing and test rows carry
//! every status, not only failures. Sources filter and convert them into
//! [`JobRun`] and [`FailedTest`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FailedTest, JobOutcome, JobRun};

/// Status value that marks a failed test row.
pub const FAILED_TEST_STATUS: &str = "failed";

/// A job run row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRunRecord {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub logs_link: Option<String>,
}

impl From<JobRunRecord> for JobRun {
    fn from(record: JobRunRecord) -> Self {
        JobRun {
            id: record.id,
            started_at: record.started_at,
            name: record.name,
            outcome: JobOutcome::from_nullable(record.outcome.as_deref()),
            logs_link: record.logs_link.unwrap_or_default(),
        }
    }
}

/// A test result row of any status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResultRecord {
    pub build_id: String,
    pub job_name: String,
    #[serde(alias = "class_name")]
    pub classname: String,
    pub name: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl TestResultRecord {
    /// Exact match, other statuses (flaky, error, skipped) are not failures.
    pub fn is_failed(&self) -> bool {
        self.status == FAILED_TEST_STATUS
    }
}

impl From<TestResultRecord> for FailedTest {
    fn from(record: TestResultRecord) -> Self {
        FailedTest {
            build_id: record.build_id,
            job_name: record.job_name,
            class_name: record.classname,
            name: record.name,
        }
    }
}

/// A complete export: `{ "jobs": [...], "tests": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordExport {
    #[serde(default)]
    pub jobs: Vec<JobRunRecord>,
    #[serde(default)]
    pub tests: Vec<TestResultRecord>,
}
