//! Job run model representing one execution of a named CI job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome of a job run.
///
/// Anything that is not exactly `failed`, including a missing outcome, is
/// folded into `Other` or `Succeeded` and breaks a failure streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum JobOutcome {
    Succeeded,
    Failed,
    Other,
}

impl JobOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Other => "other",
        }
    }

    /// Parse from the source representation.
    pub fn parse(s: &str) -> Self {
        match s {
            "failed" => Self::Failed,
            "succeeded" | "success" => Self::Succeeded,
            _ => Self::Other,
        }
    }

    /// Parse a nullable source column; NULL becomes `Other`.
    pub fn from_nullable(s: Option<&str>) -> Self {
        s.map(Self::parse).unwrap_or(Self::Other)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl From<Option<String>> for JobOutcome {
    fn from(value: Option<String>) -> Self {
        Self::from_nullable(value.as_deref())
    }
}

impl From<JobOutcome> for String {
    fn from(value: JobOutcome) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One execution of a named CI job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRun {
    /// Source identifier, unique within the window
    pub id: String,
    /// Start time, the ordering key
    pub started_at: DateTime<Utc>,
    /// Job name, the grouping key
    pub name: String,
    pub outcome: JobOutcome,
    /// Link to the run's logs (display only)
    pub logs_link: String,
}

impl JobRun {
    /// Create a new job run.
    pub fn new(
        id: impl Into<String>,
        started_at: DateTime<Utc>,
        name: impl Into<String>,
        outcome: JobOutcome,
        logs_link: impl Into<String>,
    ) -> Self {
        JobRun {
            id: id.into(),
            started_at,
            name: name.into(),
            outcome,
            logs_link: logs_link.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.outcome.is_failed()
    }
}
