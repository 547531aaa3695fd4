//! Shared state lookup in the request depot.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Fetches the injected [`State`] for handlers and hoops.
pub(crate) trait DepotExt {
    /// The shared state, or 500 when the `inject` hoop is missing from the router.
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_ignored| {
            error!("application state missing from depot");

            StatusError::internal_server_error()
        })
    }
}
