//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::wallets::{PgWalletsService, WalletsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub wallets: Arc<dyn WalletsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.pool().clone())),
            wallets: Arc::new(PgWalletsService::new(db)),
        }
    }
}
