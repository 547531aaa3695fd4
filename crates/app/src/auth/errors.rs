//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("user not found")]
    UnknownUser,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if error
            .as_database_error()
            .is_some_and(|error| error.is_foreign_key_violation())
        {
            return Self::UnknownUser;
        }

        Self::Sql(error)
    }
}
