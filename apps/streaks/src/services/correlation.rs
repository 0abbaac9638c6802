//! Join of failing runs with the tests that failed in them.

use std::collections::HashMap;

use crate::models::{FailedTest, JobRun, RunReport, StreakReport, TestRef};

use super::streaks::FailureStreak;

/// Failed tests of one job name indexed by run id.
///
/// Matching is exact identifier equality. Tests whose run id matches no run
/// are simply never looked up.
#[derive(Debug, Default)]
pub struct TestIndex<'a> {
    by_build_id: HashMap<&'a str, Vec<&'a FailedTest>>,
}

impl<'a> TestIndex<'a> {
    pub fn new(tests: &'a [FailedTest]) -> Self {
        let mut by_build_id: HashMap<&'a str, Vec<&'a FailedTest>> = HashMap::new();
        for test in tests {
            by_build_id.entry(test.build_id.as_str()).or_default().push(test);
        }
        TestIndex { by_build_id }
    }

    /// Tests that failed in `run`, in input order. Duplicates are kept.
    pub fn tests_for(&self, run: &JobRun) -> &[&'a FailedTest] {
        self.by_build_id
            .get(run.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Shape one reportable streak.
pub fn correlate_streak(streak: &FailureStreak<'_>, index: &TestIndex<'_>) -> Option<StreakReport> {
    let first = streak.first()?;
    let last = streak.last()?;

    let runs = streak
        .runs()
        .iter()
        .map(|run| {
            let failed_tests = index
                .tests_for(run)
                .iter()
                .map(|test| TestRef::from(*test))
                .collect();
            RunReport::new(run, failed_tests)
        })
        .collect();

    Some(StreakReport {
        first_started_at: first.started_at,
        last_started_at: last.started_at,
        run_count: streak.len(),
        runs,
    })
}
