//! Wallets service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{cursor::CursorError, domain::users::records::UserUuid};

/// Which store constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A unique key already exists.
    Duplicate,

    /// A referenced row (such as the project) does not exist for this owner.
    InvalidReference,
}

#[derive(Debug, Error)]
pub enum WalletsServiceError {
    /// No wallet with this identifier belongs to the owner.
    #[error("wallet not found")]
    NotFound,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid cursor")]
    InvalidCursor(#[source] CursorError),

    #[error("constraint violation: {0:?}")]
    ConstraintViolation(ConstraintKind),

    /// The store could not be reached or timed out. Safe to retry.
    #[error("storage unavailable")]
    Unavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl WalletsServiceError {
    /// Log a failed operation at a level matching how actionable it is.
    ///
    /// Client-caused failures only reach `debug`.
    pub(crate) fn report(&self, owner: UserUuid, operation: &'static str) {
        match self {
            Self::NotFound | Self::InvalidArgument(_) | Self::InvalidCursor(_) => {
                debug!(%owner, operation, error = %self, "wallet operation rejected");
            }
            Self::ConstraintViolation(kind) => {
                warn!(%owner, operation, ?kind, "wallet write violated a constraint");
            }
            Self::Unavailable(source) => {
                error!(%owner, operation, error = %source, "wallet store unavailable");
            }
            Self::Sql(source) => {
                error!(%owner, operation, error = %source, "wallet store error");
            }
        }
    }
}

/// Reporter for [`Result::inspect_err`] on a service operation.
pub(crate) fn report_failure(
    owner: UserUuid,
    operation: &'static str,
) -> impl Fn(&WalletsServiceError) {
    move |error| error.report(owner, operation)
}

impl From<CursorError> for WalletsServiceError {
    fn from(error: CursorError) -> Self {
        Self::InvalidCursor(error)
    }
}

impl From<Error> for WalletsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(
            error,
            Error::PoolTimedOut
                | Error::PoolClosed
                | Error::Io(_)
                | Error::Tls(_)
                | Error::WorkerCrashed
        ) {
            return Self::Unavailable(error);
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        // Connection exceptions (08) and operator intervention (57), which
        // includes statement timeouts and server shutdown.
        if database_error
            .code()
            .is_some_and(|code| code.starts_with("08") || code.starts_with("57"))
        {
            return Self::Unavailable(error);
        }

        match database_error.kind() {
            ErrorKind::UniqueViolation => Self::ConstraintViolation(ConstraintKind::Duplicate),
            ErrorKind::ForeignKeyViolation => {
                Self::ConstraintViolation(ConstraintKind::InvalidReference)
            }
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                Self::InvalidArgument(database_error.message().to_string())
            }
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, error::Error as StdError};

    use super::*;

    /// A server-reported error with a chosen SQLSTATE and kind.
    #[derive(Debug, Error)]
    #[error("{message}")]
    struct StubDatabaseError {
        code: &'static str,
        kind: ErrorKind,
        message: &'static str,
    }

    impl DatabaseError for StubDatabaseError {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn database_error(code: &'static str, kind: ErrorKind) -> Error {
        Error::Database(Box::new(StubDatabaseError {
            code,
            kind,
            message: "rejected by the server",
        }))
    }

    #[test]
    fn row_not_found_is_not_found() {
        let error = WalletsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, WalletsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn pool_exhaustion_is_unavailable() {
        for source in [Error::PoolTimedOut, Error::PoolClosed, Error::WorkerCrashed] {
            let error = WalletsServiceError::from(source);

            assert!(
                matches!(error, WalletsServiceError::Unavailable(_)),
                "expected Unavailable, got {error:?}"
            );
        }
    }

    #[test]
    fn io_failure_is_unavailable() {
        let source = Error::Io(std::io::Error::from(std::io::ErrorKind::ConnectionReset));
        let error = WalletsServiceError::from(source);

        assert!(
            matches!(error, WalletsServiceError::Unavailable(_)),
            "expected Unavailable, got {error:?}"
        );
    }

    #[test]
    fn protocol_error_is_sql() {
        let error = WalletsServiceError::from(Error::Protocol("unexpected message".to_string()));

        assert!(
            matches!(error, WalletsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }

    #[test]
    fn unclassified_database_error_is_sql() {
        // 22008: datetime_field_overflow
        let error = WalletsServiceError::from(database_error("22008", ErrorKind::Other));

        assert!(
            matches!(error, WalletsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }

    #[test]
    fn constraint_kinds_are_classified() {
        let duplicate = WalletsServiceError::from(database_error("23505", ErrorKind::UniqueViolation));
        let reference =
            WalletsServiceError::from(database_error("23503", ErrorKind::ForeignKeyViolation));
        let check = WalletsServiceError::from(database_error("23514", ErrorKind::CheckViolation));

        assert!(
            matches!(
                duplicate,
                WalletsServiceError::ConstraintViolation(ConstraintKind::Duplicate)
            ),
            "expected Duplicate, got {duplicate:?}"
        );
        assert!(
            matches!(
                reference,
                WalletsServiceError::ConstraintViolation(ConstraintKind::InvalidReference)
            ),
            "expected InvalidReference, got {reference:?}"
        );
        assert!(
            matches!(check, WalletsServiceError::InvalidArgument(ref message) if message == "rejected by the server"),
            "expected InvalidArgument, got {check:?}"
        );
    }

    #[test]
    fn connection_exception_is_unavailable() {
        // 57P01: admin_shutdown
        let error = WalletsServiceError::from(database_error("57P01", ErrorKind::Other));

        assert!(
            matches!(error, WalletsServiceError::Unavailable(_)),
            "expected Unavailable, got {error:?}"
        );
    }

    #[test]
    fn cursor_error_is_invalid_cursor() {
        let error = WalletsServiceError::from(CursorError::InvalidLength);

        assert!(
            matches!(
                error,
                WalletsServiceError::InvalidCursor(CursorError::InvalidLength)
            ),
            "expected InvalidCursor, got {error:?}"
        );
    }
}
