//! Wallet Errors

use salvo::http::StatusError;

use tally_app::domain::wallets::{ConstraintKind, WalletsServiceError};

/// Map a service failure to its HTTP status.
///
/// The service has already logged the failure with its owner and operation.
pub(crate) fn into_status_error(error: WalletsServiceError) -> StatusError {
    match error {
        WalletsServiceError::NotFound => StatusError::not_found().brief("Wallet not found"),
        WalletsServiceError::InvalidArgument(message) => StatusError::bad_request().brief(message),
        WalletsServiceError::InvalidCursor(_) => {
            StatusError::bad_request().brief("Invalid pagination token")
        }
        WalletsServiceError::ConstraintViolation(ConstraintKind::Duplicate) => {
            StatusError::conflict().brief("Wallet already exists")
        }
        WalletsServiceError::ConstraintViolation(ConstraintKind::InvalidReference) => {
            StatusError::conflict().brief("Referenced project does not exist")
        }
        WalletsServiceError::Unavailable(_) => StatusError::service_unavailable(),
        WalletsServiceError::Sql(_) => StatusError::internal_server_error(),
    }
}
