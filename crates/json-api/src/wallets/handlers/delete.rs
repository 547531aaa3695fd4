//! Delete Wallet Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, wallets::errors::into_status_error};

/// Delete Wallet Handler
#[endpoint(
    tags("wallets"),
    summary = "Delete Wallet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Wallet deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Wallet not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    wallet: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.owner_uuid_or_401()?;

    state
        .app
        .wallets
        .delete_wallet(owner, wallet.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
