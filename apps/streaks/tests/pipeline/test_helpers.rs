//! Shared builders for pipeline tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ci_streaks::models::{JobRunRecord, RecordExport, TestResultRecord, Window};
use ci_streaks::services::RecordQuery;

/// Start of the test window.
pub fn window_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 18, 0, 0, 0).unwrap()
}

/// Two-week window starting at [`window_start`].
pub fn test_query(prefix: &str) -> RecordQuery {
    let from = window_start();
    let window = Window::new(from, from + Duration::days(14)).unwrap();
    RecordQuery::new(window, prefix)
}

/// Job rows for `name`, one per outcome, one hour apart starting at `offset_hours`.
///
/// Ids are `<name>-<position>`; `None` outcomes model rows without an outcome.
pub fn job_rows(name: &str, offset_hours: i64, outcomes: &[Option<&str>]) -> Vec<JobRunRecord> {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, outcome)| JobRunRecord {
            id: format!("{}-{}", name, i),
            started_at: window_start() + Duration::hours(offset_hours + i as i64),
            name: name.to_string(),
            outcome: outcome.map(str::to_string),
            logs_link: Some(format!("https://ci.example.com/logs/{}-{}", name, i)),
        })
        .collect()
}

/// A failed test row recorded one minute into the window.
pub fn failed_test(build_id: &str, job_name: &str, classname: &str, name: &str) -> TestResultRecord {
    TestResultRecord {
        build_id: build_id.to_string(),
        job_name: job_name.to_string(),
        classname: classname.to_string(),
        name: name.to_string(),
        status: "failed".to_string(),
        timestamp: window_start() + Duration::minutes(1),
    }
}

pub fn export(jobs: Vec<Vec<JobRunRecord>>, tests: Vec<TestResultRecord>) -> RecordExport {
    RecordExport {
        jobs: jobs.into_iter().flatten().collect(),
        tests,
    }
}
