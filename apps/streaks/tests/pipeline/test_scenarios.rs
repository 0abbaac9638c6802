//! Streak scenarios through the full pipeline.

use ci_streaks::models::AnalysisReport;
use ci_streaks::services::{AnalysisSettings, StaticSource, render_text, run_analysis};

use super::test_helpers::*;

const OK: Option<&str> = Some("success");
const FAIL: Option<&str> = Some("failed");

async fn analyze(source: &StaticSource, min_streak_length: usize) -> AnalysisReport {
    run_analysis(
        source,
        &test_query(""),
        &AnalysisSettings { min_streak_length },
    )
    .await
    .expect("static source never fails")
}

fn streak_ids(report: &AnalysisReport, job: usize) -> Vec<Vec<String>> {
    report.jobs[job]
        .streaks
        .iter()
        .map(|s| s.runs.iter().map(|r| r.id.clone()).collect())
        .collect()
}

/// [ok, failed, failed, failed, ok] -> one streak of the three failures.
#[tokio::test]
async fn test_streak_between_successes() {
    let source = StaticSource::new(export(
        vec![job_rows("e2e", 0, &[OK, FAIL, FAIL, FAIL, OK])],
        vec![],
    ));

    let report = analyze(&source, 3).await;

    assert_eq!(report.jobs.len(), 1);
    assert_eq!(report.jobs[0].total_runs, 5);
    assert_eq!(streak_ids(&report, 0), vec![vec!["e2e-1", "e2e-2", "e2e-3"]]);
}

/// [failed, failed] is below the default threshold.
#[tokio::test]
async fn test_short_streak_not_reported() {
    let source = StaticSource::new(export(vec![job_rows("e2e", 0, &[FAIL, FAIL])], vec![]));

    let report = analyze(&source, 3).await;

    assert_eq!(report.jobs.len(), 1);
    assert!(report.jobs[0].streaks.is_empty());
    assert_eq!(report.streak_count(), 0);
}

/// [failed, ok, failed, failed, failed] -> only the trailing streak.
#[tokio::test]
async fn test_leading_single_failure_dropped() {
    let source = StaticSource::new(export(
        vec![job_rows("e2e", 0, &[FAIL, OK, FAIL, FAIL, FAIL])],
        vec![],
    ));

    let report = analyze(&source, 3).await;

    assert_eq!(streak_ids(&report, 0), vec![vec!["e2e-2", "e2e-3", "e2e-4"]]);
}

/// A test failing in C is reported under C only.
#[tokio::test]
async fn test_failed_test_correlated_with_its_run() {
    let source = StaticSource::new(export(
        vec![job_rows("e2e", 0, &[FAIL, OK, FAIL, FAIL, FAIL])],
        vec![failed_test("e2e-2", "e2e", "Foo", "bar")],
    ));

    let report = analyze(&source, 3).await;
    let runs = &report.jobs[0].streaks[0].runs;

    assert_eq!(runs[0].failed_tests.len(), 1);
    assert_eq!(runs[0].failed_tests[0].class_name, "Foo");
    assert_eq!(runs[0].failed_tests[0].name, "bar");
    assert!(runs[1].failed_tests.is_empty());
    assert!(runs[2].failed_tests.is_empty());
}

/// Missing outcomes break a streak like a success does.
#[tokio::test]
async fn test_missing_outcome_breaks_streak() {
    let source = StaticSource::new(export(
        vec![job_rows("e2e", 0, &[FAIL, FAIL, None, FAIL, FAIL, FAIL])],
        vec![],
    ));

    let report = analyze(&source, 2).await;

    assert_eq!(
        streak_ids(&report, 0),
        vec![vec!["e2e-0", "e2e-1"], vec!["e2e-3", "e2e-4", "e2e-5"]]
    );
}

/// Runs of different job names interleave in time but never share a streak.
#[tokio::test]
async fn test_interleaved_job_names() {
    // e2e at hours 0,2,4,... and unit at hours 1,3,5,...
    let mut e2e = job_rows("e2e", 0, &[FAIL, FAIL, FAIL]);
    for (i, row) in e2e.iter_mut().enumerate() {
        row.started_at = window_start() + chrono::Duration::hours(2 * i as i64);
    }
    let mut unit = job_rows("unit", 0, &[FAIL, OK, FAIL]);
    for (i, row) in unit.iter_mut().enumerate() {
        row.started_at = window_start() + chrono::Duration::hours(2 * i as i64 + 1);
    }

    let source = StaticSource::new(export(
        vec![e2e, unit],
        vec![
            failed_test("unit-0", "unit", "Unit", "broken"),
            // Same run id under another job name is not joined
            failed_test("e2e-0", "unit", "Unit", "misfiled"),
            failed_test("e2e-0", "e2e", "E2e", "login"),
        ],
    ));

    let report = analyze(&source, 3).await;

    assert_eq!(report.jobs.len(), 2);
    assert_eq!(report.jobs[0].name, "e2e");
    assert_eq!(streak_ids(&report, 0), vec![vec!["e2e-0", "e2e-1", "e2e-2"]]);
    let first = &report.jobs[0].streaks[0].runs[0];
    assert_eq!(first.failed_tests.len(), 1);
    assert_eq!(first.failed_tests[0].name, "login");

    assert_eq!(report.jobs[1].name, "unit");
    assert!(report.jobs[1].streaks.is_empty());
    assert_eq!(report.alerting_jobs().count(), 1);
}

/// Records outside the window or prefix never reach the detector.
#[tokio::test]
async fn test_window_and_prefix_filters() {
    let mut rows = job_rows("master-e2e", 0, &[FAIL, FAIL, FAIL]);
    // Push the last failure out of the window: streak shrinks to two
    rows[2].started_at = window_start() + chrono::Duration::days(30);

    let source = StaticSource::new(export(
        vec![rows, job_rows("pr-e2e", 0, &[FAIL, FAIL, FAIL])],
        vec![],
    ));

    let report = run_analysis(
        &source,
        &test_query("master-"),
        &AnalysisSettings::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.jobs.len(), 1);
    assert_eq!(report.jobs[0].name, "master-e2e");
    assert_eq!(report.jobs[0].total_runs, 2);
    assert!(report.jobs[0].streaks.is_empty());
    assert_eq!(report.name_prefix, "master-");
}

#[tokio::test]
async fn test_empty_window_is_not_an_error() {
    let source = StaticSource::default();
    let report = analyze(&source, 3).await;
    assert!(report.is_empty());
    assert_eq!(render_text(&report, false), "");
}

#[tokio::test]
async fn test_repeated_runs_identical() {
    let source = StaticSource::new(export(
        vec![
            job_rows("b-job", 0, &[FAIL, FAIL, FAIL, OK]),
            job_rows("a-job", 0, &[OK, FAIL, FAIL, FAIL]),
        ],
        vec![failed_test("a-job-1", "a-job", "A", "one")],
    ));

    let first = analyze(&source, 3).await;
    let second = analyze(&source, 3).await;

    assert_eq!(first, second);
    assert_eq!(render_text(&first, false), render_text(&second, false));
    assert_eq!(first.jobs[0].name, "a-job");
}
