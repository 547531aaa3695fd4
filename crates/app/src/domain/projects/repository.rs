//! Projects Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    projects::{
        data::NewProject,
        records::{ProjectRecord, ProjectUuid},
    },
    users::records::UserUuid,
};

const CREATE_PROJECT_SQL: &str = include_str!("sql/create_project.sql");
const GET_PROJECT_SQL: &str = include_str!("sql/get_project.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProjectsRepository;

impl PgProjectsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        project: NewProject,
    ) -> Result<ProjectRecord, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(CREATE_PROJECT_SQL)
            .bind(project.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(project.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        project: ProjectUuid,
    ) -> Result<ProjectRecord, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(GET_PROJECT_SQL)
            .bind(project.into_uuid())
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProjectRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProjectUuid::from_uuid(row.try_get("uuid")?),
            owner: UserUuid::from_uuid(row.try_get("user_uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
