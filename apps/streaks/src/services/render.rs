//! Report rendering.

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};

use crate::config::OutputFormat;
use crate::error::AppResult;
use crate::models::{AnalysisReport, JobReport};

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn write_job(out: &mut impl Write, job: &JobReport) -> fmt::Result {
    writeln!(out, "{}, {} jobs", job.name, job.total_runs)?;

    for streak in &job.streaks {
        writeln!(
            out,
            "\tpotential batch for alert: {}-{}, {} jobs",
            format_timestamp(&streak.first_started_at),
            format_timestamp(&streak.last_started_at),
            streak.run_count
        )?;

        for run in &streak.runs {
            writeln!(out, "\t\t{}", run.logs_link)?;
            for test in &run.failed_tests {
                writeln!(out, "\t\t\t{}, {}", test.class_name, test.name)?;
            }
        }
    }
    Ok(())
}

/// Text report view, one indented block per job name.
pub struct TextReport<'a> {
    report: &'a AnalysisReport,
    only_alerting: bool,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a AnalysisReport, only_alerting: bool) -> Self {
        TextReport {
            report,
            only_alerting,
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report
            .jobs
            .iter()
            .filter(|job| !self.only_alerting || job.is_alerting())
            .try_for_each(|job| write_job(f, job))
    }
}

/// Plain text, one indented block per job name.
///
/// With `only_alerting`, job names without reportable streaks are skipped.
pub fn render_text(report: &AnalysisReport, only_alerting: bool) -> String {
    TextReport::new(report, only_alerting).to_string()
}

/// Pretty-printed JSON of the whole report.
pub fn render_json(report: &AnalysisReport) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render(report: &AnalysisReport, format: OutputFormat, only_alerting: bool) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, only_alerting)),
        OutputFormat::Json => render_json(report),
    }
}
