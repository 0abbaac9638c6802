//! Database module providing connection management and record queries.

pub mod job_runs;

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{FailedTest, JobRun, Window};
use crate::services::{RecordQuery, RecordSource};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL.
    pub async fn new(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        info!("Database connection established (pool size: {})", max_connections);

        Ok(DbPool { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

#[async_trait]
impl RecordSource for DbPool {
    async fn fetch_job_runs(&self, query: &RecordQuery) -> AppResult<Vec<JobRun>> {
        self.get_job_runs(&query.window, &query.name_prefix).await
    }

    async fn fetch_failed_tests(&self, window: &Window) -> AppResult<Vec<FailedTest>> {
        self.get_failed_tests(window).await
    }
}
