//! Streak analysis over one window: grouping, detection and correlation.
//!
//! Everything here except [`run_analysis`] is synchronous, pure computation.
//! Job names are independent of each other and are processed in name order.

use tracing::{debug, info};

use crate::config::defaults;
use crate::error::AppResult;
use crate::models::{AnalysisReport, FailedTest, JobReport, JobRun};

use super::correlation::{TestIndex, correlate_streak};
use super::grouping::{RecordGroups, group_records};
use super::ingest::{RecordQuery, RecordSource, fetch_window};
use super::streaks::reportable_streaks;

/// Detector parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Streaks with fewer runs are dropped silently
    pub min_streak_length: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            min_streak_length: defaults::MIN_STREAK_LENGTH,
        }
    }
}

/// Analyze the ordered runs and the failed tests of one job name.
pub fn analyze_job(
    name: &str,
    runs: &[JobRun],
    tests: &[FailedTest],
    settings: &AnalysisSettings,
) -> JobReport {
    let index = TestIndex::new(tests);

    let streaks: Vec<_> = reportable_streaks(runs, settings.min_streak_length)
        .iter()
        .filter_map(|streak| correlate_streak(streak, &index))
        .collect();

    for streak in &streaks {
        debug!(
            "{}: {} consecutive failures from {} to {}",
            name, streak.run_count, streak.first_started_at, streak.last_started_at
        );
    }

    JobReport {
        name: name.to_string(),
        total_runs: runs.len(),
        streaks,
    }
}

/// Analyze every job name of a grouped window.
pub fn analyze(groups: &RecordGroups, settings: &AnalysisSettings) -> Vec<JobReport> {
    groups
        .runs_by_name
        .iter()
        .map(|(name, runs)| analyze_job(name, runs, groups.tests_for(name), settings))
        .collect()
}

/// Fetch a window from `source` and analyze it.
///
/// Fails only when the source fails; an empty window gives an empty report.
pub async fn run_analysis<S>(
    source: &S,
    query: &RecordQuery,
    settings: &AnalysisSettings,
) -> AppResult<AnalysisReport>
where
    S: RecordSource + ?Sized,
{
    let records = fetch_window(source, query).await?;
    let groups = group_records(records);
    let jobs = analyze(&groups, settings);

    let report = AnalysisReport {
        window: query.window,
        name_prefix: query.name_prefix.clone(),
        min_streak_length: settings.min_streak_length,
        jobs,
    };

    info!(
        "Analyzed {} job names: {} reportable streaks in {} jobs (threshold {})",
        report.jobs.len(),
        report.streak_count(),
        report.alerting_jobs().count(),
        settings.min_streak_length
    );

    Ok(report)
}
