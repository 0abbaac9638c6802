//! Failure streak detection.
//!
//! A streak is a maximal run of consecutive `failed` outcomes in one job
//! name's ordered run list. Adjacency is positional: a time gap between two
//! failing runs does not split a streak, only a run with another outcome does.

use crate::models::JobRun;

/// A maximal, contiguous slice of failed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureStreak<'a> {
    runs: &'a [JobRun],
    start: usize,
}

impl<'a> FailureStreak<'a> {
    fn new(all_runs: &'a [JobRun], start: usize, end: usize) -> Self {
        FailureStreak {
            runs: &all_runs[start..end],
            start,
        }
    }

    /// Member runs in chronological order.
    pub fn runs(&self) -> &'a [JobRun] {
        self.runs
    }

    /// Position of the first member in the job name's run list.
    pub fn start_index(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Never true for detected streaks.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn first(&self) -> Option<&'a JobRun> {
        self.runs.first()
    }

    pub fn last(&self) -> Option<&'a JobRun> {
        self.runs.last()
    }

    pub fn is_reportable(&self, min_streak_length: usize) -> bool {
        self.len() >= min_streak_length
    }
}

/// Find every failure streak in one job name's ordered runs, in scan order.
pub fn detect_streaks(runs: &[JobRun]) -> Vec<FailureStreak<'_>> {
    let mut streaks = Vec::new();
    let mut open: Option<usize> = None;

    for (idx, run) in runs.iter().enumerate() {
        match (run.is_failed(), open) {
            (true, None) => open = Some(idx),
            (true, Some(_)) => {}
            (false, Some(start)) => {
                streaks.push(FailureStreak::new(runs, start, idx));
                open = None;
            }
            (false, None) => {}
        }
    }

    if let Some(start) = open {
        streaks.push(FailureStreak::new(runs, start, runs.len()));
    }

    streaks
}

/// Streaks with at least `min_streak_length` members; shorter ones are dropped.
pub fn reportable_streaks(runs: &[JobRun], min_streak_length: usize) -> Vec<FailureStreak<'_>> {
    detect_streaks(runs)
        .into_iter()
        .filter(|streak| streak.is_reportable(min_streak_length))
        .collect()
}
