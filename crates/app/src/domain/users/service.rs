//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::users::{
    data::NewUser,
    errors::UsersServiceError,
    records::{UserRecord, UserUuid},
    repository::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        self.repository.create_user(user).await.map_err(Into::into)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        self.repository.get_user(user).await.map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// User persistence operations.
pub trait UsersService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single, non-deleted user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;
}
