//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError, query};

use crate::domain::users::records::UserUuid;

/// SQL used to set the owning user for row-level security.
pub const SET_OWNER_CONTEXT_SQL: &str = "SELECT set_config('app.current_user_uuid', $1, true)";

const PING_SQL: &str = "SELECT 1";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction and set the owner context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting owner context fails.
    pub async fn begin_owner_transaction(
        &self,
        owner: UserUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_OWNER_CONTEXT_SQL)
            .bind(owner.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Round-trip a trivial statement to confirm the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired or the statement fails.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        query(PING_SQL).execute(&self.pool).await?;

        Ok(())
    }

    /// Returns the underlying pool for statements that are not owner scoped.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
