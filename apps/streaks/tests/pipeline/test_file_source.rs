//! JSON export source end to end.

use ci_streaks::config::OutputFormat;
use ci_streaks::error::AppError;
use ci_streaks::models::AnalysisReport;
use ci_streaks::services::{AnalysisSettings, JsonFileSource, render, run_analysis};

use super::test_helpers::*;

const OK: Option<&str> = Some("success");
const FAIL: Option<&str> = Some("failed");

fn write_export(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("export.json");
    std::fs::write(&path, content).expect("write export");
    path
}

#[tokio::test]
async fn test_file_source_report() {
    let mut tests = vec![
        failed_test("nightly-1", "nightly", "org.Foo", "bar"),
        failed_test("nightly-1", "nightly", "org.Foo", "bar"),
    ];
    let mut passed = failed_test("nightly-2", "nightly", "org.Foo", "baz");
    passed.status = "passed".to_string();
    tests.push(passed);

    let data = export(vec![job_rows("nightly", 0, &[OK, FAIL, FAIL, FAIL])], tests);
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(&dir, &serde_json::to_string(&data).unwrap());

    let source = JsonFileSource::new(&path);
    let report = run_analysis(&source, &test_query(""), &AnalysisSettings::default())
        .await
        .unwrap();

    let text = render(&report, OutputFormat::Text, false).unwrap();
    let expected = "\
nightly, 4 jobs
\tpotential batch for alert: 2024-02-18 01:00:00 UTC-2024-02-18 03:00:00 UTC, 3 jobs
\t\thttps://ci.example.com/logs/nightly-1
\t\t\torg.Foo, bar
\t\t\torg.Foo, bar
\t\thttps://ci.example.com/logs/nightly-2
\t\thttps://ci.example.com/logs/nightly-3
";
    assert_eq!(text, expected);

    let json = render(&report, OutputFormat::Json, false).unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[tokio::test]
async fn test_file_source_null_outcome_and_missing_link() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(
        &dir,
        r#"{
            "jobs": [
                {"id": "1", "started_at": "2024-02-19T00:00:00Z", "name": "e2e", "outcome": "failed"},
                {"id": "2", "started_at": "2024-02-19T01:00:00Z", "name": "e2e", "outcome": null},
                {"id": "3", "started_at": "2024-02-19T02:00:00Z", "name": "e2e", "outcome": "failed"}
            ]
        }"#,
    );

    let source = JsonFileSource::new(&path);
    let report = run_analysis(&source, &test_query(""), &AnalysisSettings { min_streak_length: 1 })
        .await
        .unwrap();

    let streaks = &report.jobs[0].streaks;
    assert_eq!(streaks.len(), 2);
    assert_eq!(streaks[0].runs[0].logs_link, "");
}

#[tokio::test]
async fn test_file_source_malformed_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(
        &dir,
        r#"{"jobs": [{"id": "1", "started_at": "not a time", "name": "e2e"}]}"#,
    );

    let source = JsonFileSource::new(&path);
    let result = run_analysis(&source, &test_query(""), &AnalysisSettings::default()).await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}
