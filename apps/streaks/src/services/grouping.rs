//! Partitioning of ingested records by job name.
//!
//! Run order is taken as ingested. Streak detection depends entirely on that
//! order, so callers that build records by hand must sort them ascending by
//! `started_at` before grouping; the record sources already do.

use std::collections::{BTreeMap, HashMap};

use crate::models::{FailedTest, JobRun};

use super::ingest::IngestedRecords;

/// Records of one window, keyed by job name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordGroups {
    /// Runs per job name in ingestion order. Ordered by name so that every
    /// pass over the same input yields the same report.
    pub runs_by_name: BTreeMap<String, Vec<JobRun>>,
    /// Failed tests per job name in ingestion order
    pub tests_by_name: HashMap<String, Vec<FailedTest>>,
}

impl RecordGroups {
    /// Failed tests of one job name; empty when none were recorded.
    pub fn tests_for(&self, name: &str) -> &[FailedTest] {
        self.tests_by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.runs_by_name.is_empty()
    }
}

/// Group runs by job name. Empty names form their own group.
pub fn group_runs(runs: Vec<JobRun>) -> BTreeMap<String, Vec<JobRun>> {
    let mut groups: BTreeMap<String, Vec<JobRun>> = BTreeMap::new();
    for run in runs {
        groups.entry(run.name.clone()).or_default().push(run);
    }
    groups
}

/// Group failed tests by the job name they were recorded under.
pub fn group_tests(tests: Vec<FailedTest>) -> HashMap<String, Vec<FailedTest>> {
    let mut groups: HashMap<String, Vec<FailedTest>> = HashMap::new();
    for test in tests {
        groups.entry(test.job_name.clone()).or_default().push(test);
    }
    groups
}

/// Group both record sets of one window.
pub fn group_records(records: IngestedRecords) -> RecordGroups {
    RecordGroups {
        runs_by_name: group_runs(records.runs),
        tests_by_name: group_tests(records.tests),
    }
}
