//! Domain models for the streak analyzer.

pub mod job_run;
pub mod records;
pub mod report;
pub mod window;

// Re-export commonly used types
pub use failed_test::FailedTest;
pub use job_run::{JobOutcome, JobRun};
pub use records::{JobRunRecord, RecordExport, TestResultRecord};
pub use report::{AnalysisReport, JobReport, RunReport, StreakReport, TestRef};
pub use window::Window;
