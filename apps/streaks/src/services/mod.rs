//! Business logic services.

pub mod analysis;
pub mod correlation;
pub mod grouping;
pub mod ingest;
pub mod render;
pub mod sources;
pub mod streaks;

pub use analysis::{AnalysisSettings, analyze, run_analysis};
pub use grouping::{RecordGroups, group_records};
pub use ingest::{IngestedRecords, RecordQuery, RecordSource, fetch_window};
pub use render::{TextReport, render, render_json, render_text};
pub use sources::{JsonFileSource, StaticSource};
pub use streaks::{FailureStreak, detect_streaks};
