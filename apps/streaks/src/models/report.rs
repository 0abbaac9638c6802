//! Structured streak report, ready for text or JSON rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FailedTest, JobRun, Window};

/// Identifier of a failed test as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRef {
    pub class_name: String,
    pub name: String,
}

impl From<&FailedTest> for TestRef {
    fn from(test: &FailedTest) -> Self {
        TestRef {
            class_name: test.class_name.clone(),
            name: test.name.clone(),
        }
    }
}

/// One failing run inside a streak, with the tests that failed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub logs_link: String,
    /// Matched failed tests in source order; may be empty
    pub failed_tests: Vec<TestRef>,
}

impl RunReport {
    pub fn new(run: &JobRun, failed_tests: Vec<TestRef>) -> Self {
        RunReport {
            id: run.id.clone(),
            started_at: run.started_at,
            logs_link: run.logs_link.clone(),
            failed_tests,
        }
    }
}

/// A reportable failure streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakReport {
    /// Start time of the first failing run
    pub first_started_at: DateTime<Utc>,
    /// Start time of the last failing run
    pub last_started_at: DateTime<Utc>,
    pub run_count: usize,
    pub runs: Vec<RunReport>,
}

/// All reportable streaks of one job name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub name: String,
    /// Runs of this job name in the window, failed or not
    pub total_runs: usize,
    pub streaks: Vec<StreakReport>,
}

impl JobReport {
    /// Whether at least one streak reached the threshold.
    pub fn is_alerting(&self) -> bool {
        !self.streaks.is_empty()
    }
}

/// Result of one analysis pass over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub window: Window,
    pub name_prefix: String,
    pub min_streak_length: usize,
    /// One entry per job name seen in the window, ordered by name
    pub jobs: Vec<JobReport>,
}

impl AnalysisReport {
    /// Job names with at least one reportable streak.
    pub fn alerting_jobs(&self) -> impl Iterator<Item = &JobReport> {
        self.jobs.iter().filter(|job| job.is_alerting())
    }

    /// Total number of reportable streaks across all job names.
    pub fn streak_count(&self) -> usize {
        self.jobs.iter().map(|job| job.streaks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
