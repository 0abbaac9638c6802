//! Job run entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::models::{JobOutcome, JobRun};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub started_at: DateTimeUtc,
    pub name: String,
    /// NULL while the run has not reported an outcome
    pub outcome: Option<String>,
    pub logs_link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for JobRun {
    fn from(model: Model) -> Self {
        JobRun {
            id: model.id,
            started_at: model.started_at,
            name: model.name,
            outcome: JobOutcome::from_nullable(model.outcome.as_deref()),
            logs_link: model.logs_link.unwrap_or_default(),
        }
    }
}
