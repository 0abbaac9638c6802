//! End-to-end pipeline test suite.
//!
//! Drives fetch, grouping, detection, correlation and rendering through the
//! in-memory and JSON file record sources. No database required.
//!
//! Run with: cargo test --test pipeline

mod test_helpers;

mod test_file_source;
mod test_scenarios;
