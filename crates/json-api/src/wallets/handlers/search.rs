//! Wallet Search Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    wallets::{errors::into_status_error, index::DEFAULT_PAGE_LIMIT, responses::WalletResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchWalletsResponse {
    /// Matching wallets, closest name first
    pub wallets: Vec<WalletResponse>,
}

/// Wallet Search Handler
///
/// Finds the owner's wallets whose names are similar to `q`. A blank `q`
/// lists wallets newest first.
#[endpoint(
    tags("wallets"),
    summary = "Search Wallets",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching wallets"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid limit or query"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Wallet store unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<SearchWalletsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.owner_uuid_or_401()?;

    let wallets = state
        .app
        .wallets
        .search_wallets(
            owner,
            q.into_inner().unwrap_or_default(),
            limit.into_inner().unwrap_or(DEFAULT_PAGE_LIMIT),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(SearchWalletsResponse {
        wallets: wallets.into_iter().map(Into::into).collect(),
    }))
}
