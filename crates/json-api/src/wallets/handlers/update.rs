//! Update Wallet Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    wallets::{errors::into_status_error, requests::WalletRequest, responses::WalletResponse},
};

/// Update Wallet Handler
///
/// Replaces every editable field; omitted optional fields are cleared.
#[endpoint(
    tags("wallets"),
    summary = "Update Wallet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wallet updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Wallet not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid wallet payload"),
        (status_code = StatusCode::CONFLICT, description = "Unknown project"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "wallets.update",
    skip(wallet, json, depot),
    fields(
        owner = tracing::field::Empty,
        wallet = tracing::field::Empty,
        tags_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    wallet: PathParam<Uuid>,
    json: JsonBody<WalletRequest>,
    depot: &mut Depot,
) -> Result<Json<WalletResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.owner_uuid_or_401()?;
    let wallet = wallet.into_inner();
    let update = json.into_inner().into_wallet_update()?;

    let span = tracing::Span::current();

    span.record("owner", tracing::field::display(owner));
    span.record("wallet", tracing::field::display(wallet));
    span.record(
        "tags_count",
        update.tags.as_ref().map_or(0, Vec::len),
    );

    let updated = state
        .app
        .wallets
        .update_wallet(owner, wallet.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
