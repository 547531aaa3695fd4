//! Projects service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        projects::{
            data::NewProject,
            errors::ProjectsServiceError,
            records::{ProjectRecord, ProjectUuid},
            repository::PgProjectsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProjectsService {
    db: Db,
    repository: PgProjectsRepository,
}

impl PgProjectsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProjectsRepository::new(),
        }
    }
}

#[async_trait]
impl ProjectsService for PgProjectsService {
    async fn create_project(
        &self,
        owner: UserUuid,
        project: NewProject,
    ) -> Result<ProjectRecord, ProjectsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let created = self
            .repository
            .create_project(&mut tx, owner, project)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_project(
        &self,
        owner: UserUuid,
        project: ProjectUuid,
    ) -> Result<ProjectRecord, ProjectsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let project = self.repository.get_project(&mut tx, owner, project).await?;

        tx.commit().await?;

        Ok(project)
    }
}

#[automock]
#[async_trait]
pub trait ProjectsService: Send + Sync {
    /// Creates a project owned by `owner`.
    async fn create_project(
        &self,
        owner: UserUuid,
        project: NewProject,
    ) -> Result<ProjectRecord, ProjectsServiceError>;

    /// Retrieve one of the owner's projects.
    async fn get_project(
        &self,
        owner: UserUuid,
        project: ProjectUuid,
    ) -> Result<ProjectRecord, ProjectsServiceError>;
}
