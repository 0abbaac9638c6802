//! Inclusive time window for record retrieval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed timestamp range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Window {
    /// Create a window, or `None` when `from` is later than `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<Self> {
        (from <= to).then_some(Window { from, to })
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from <= ts && ts <= self.to
    }
}
