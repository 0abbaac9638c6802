//! Database queries for job runs.

use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::entity::job_run::{self, Entity as JobRunEntity};
use crate::error::{AppError, AppResult};
use crate::models::{JobRun, Window};

use super::DbPool;

/// Escape character used in LIKE patterns.
const LIKE_ESCAPE: char = '\\';

/// Turn a literal prefix into a LIKE pattern, escaping the LIKE metacharacters.
pub fn prefix_like_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Select job runs started inside the window whose name starts with `name_prefix`.
///
/// Ties on `started_at` are ordered by id so repeated queries return the
/// same sequence. An empty prefix matches every job name.
pub fn job_runs_query(window: &Window, name_prefix: &str) -> Select<JobRunEntity> {
    let mut select = JobRunEntity::find()
        .filter(job_run::Column::StartedAt.gte(window.from))
        .filter(job_run::Column::StartedAt.lte(window.to));

    if !name_prefix.is_empty() {
        let pattern = LikeExpr::new(prefix_like_pattern(name_prefix)).escape(LIKE_ESCAPE);
        select = select.filter(job_run::Column::Name.like(pattern));
    }

    select
        .order_by_asc(job_run::Column::StartedAt)
        .order_by_asc(job_run::Column::Id)
}

impl DbPool {
    /// Get job runs started inside the window, ascending by start time.
    pub async fn get_job_runs(&self, window: &Window, name_prefix: &str) -> AppResult<Vec<JobRun>> {
        let rows = job_runs_query(window, name_prefix)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get job runs: {}", e)))?;

        Ok(rows.into_iter().map(JobRun::from).collect())
    }
}
