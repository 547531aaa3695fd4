//! Get Wallet Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    wallets::{errors::into_status_error, responses::WalletResponse},
};

/// Get Wallet Handler
///
/// Another owner's wallet is reported as not found.
#[endpoint(
    tags("wallets"),
    summary = "Get Wallet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The wallet"),
        (status_code = StatusCode::NOT_FOUND, description = "Wallet not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    wallet: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WalletResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.owner_uuid_or_401()?;

    let wallet = state
        .app
        .wallets
        .get_wallet(owner, wallet.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(wallet.into()))
}
