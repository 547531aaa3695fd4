//! Readiness check for load balancers and orchestrators.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tally_app::domain::wallets::WalletsServiceError;

use crate::extensions::*;

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Healthcheck handler
///
/// Ready only while the wallet store answers queries. Unauthenticated.
#[endpoint(
    tags("health"),
    summary = "Readiness check",
    responses(
        (status_code = StatusCode::OK, description = "Ready to serve requests"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Wallet store unreachable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.state_or_500()?;

    match state.app.wallets.ping().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "ok".to_owned(),
        })),
        Err(WalletsServiceError::Unavailable(_) | WalletsServiceError::Sql(_)) => {
            Err(StatusError::service_unavailable().brief("Wallet store unavailable"))
        }
        Err(_) => Err(StatusError::internal_server_error()),
    }
}
