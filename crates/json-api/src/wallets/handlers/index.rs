//! Wallet Index Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use tally_app::{cursor::Cursor, domain::wallets::WalletsServiceError};

use crate::{
    extensions::*,
    wallets::{errors::into_status_error, responses::WalletsResponse},
};

/// Page size when the caller gives no `limit`.
pub(crate) const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Wallet Index Handler
///
/// Lists the owner's wallets newest first. Pages by `next_token` by default,
/// or by `offset` when one is given.
#[endpoint(
    tags("wallets"),
    summary = "List Wallets",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "A page of wallets"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid limit, offset or token"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Wallet store unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<i64, false>,
    offset: QueryParam<i64, false>,
    next_token: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<WalletsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.owner_uuid_or_401()?;
    let limit = limit.into_inner().unwrap_or(DEFAULT_PAGE_LIMIT);

    match (offset.into_inner(), next_token.into_inner()) {
        (Some(_), Some(_)) => {
            Err(StatusError::bad_request().brief("offset and next_token cannot be combined"))
        }
        (Some(offset), None) => {
            let wallets = state
                .app
                .wallets
                .list_wallets(owner, limit, offset)
                .await
                .map_err(into_status_error)?;

            Ok(Json(WalletsResponse::unpaginated(wallets)))
        }
        (None, token) => {
            let cursor = token
                .as_deref()
                .map(Cursor::decode)
                .transpose()
                .map_err(WalletsServiceError::from)
                .map_err(into_status_error)?
                .unwrap_or_else(Cursor::start);

            let wallets = state
                .app
                .wallets
                .list_wallets_paginated(owner, cursor, limit)
                .await
                .map_err(into_status_error)?;

            Ok(Json(WalletsResponse::paginated(wallets, limit)))
        }
    }
}
