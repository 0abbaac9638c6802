//! CI failure streak analyzer library.
//!
//! This library fetches job runs and failed tests for a time window, finds
//! streaks of consecutive job failures per job name and correlates every
//! failing run with the tests that failed in it.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod models;
pub mod services;
