//! Test result entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::models::FailedTest;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "test_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `job_runs.id` of the run the test executed in
    pub build_id: String,
    pub job_name: String,
    pub classname: String,
    pub name: String,
    /// passed, failed, skipped, ...
    pub status: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FailedTest {
    fn from(model: Model) -> Self {
        FailedTest {
            build_id: model.build_id,
            job_name: model.job_name,
            class_name: model.classname,
            name: model.name,
        }
    }
}
