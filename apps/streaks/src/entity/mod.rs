//! SeaORM entity definitions for the CI metrics tables.
//!
//! The tables are owned by the CI metrics pipeline; this crate only reads them.

pub mod job_run;
pub mod test_result;
