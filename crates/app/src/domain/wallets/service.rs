//! Wallets service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    cursor::Cursor,
    database::Db,
    domain::{
        users::records::UserUuid,
        wallets::{
            data::{NewWallet, WalletUpdate},
            errors::{WalletsServiceError, report_failure},
            policy,
            records::{WalletRecord, WalletUuid},
            repository::PgWalletsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWalletsService {
    db: Db,
    repository: PgWalletsRepository,
}

impl PgWalletsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWalletsRepository::new(),
        }
    }
}

#[async_trait]
impl WalletsService for PgWalletsService {
    #[tracing::instrument(
        name = "wallets.service.get_wallet",
        skip(self),
        fields(owner = %owner, wallet = %wallet)
    )]
    async fn get_wallet(
        &self,
        owner: UserUuid,
        wallet: WalletUuid,
    ) -> Result<WalletRecord, WalletsServiceError> {
        async {
            let mut tx = self.db.begin_owner_transaction(owner).await?;

            let wallet = self.repository.get_wallet(&mut tx, owner, wallet).await?;

            tx.commit().await?;

            Ok(wallet)
        }
        .await
        .inspect_err(report_failure(owner, "get_wallet"))
    }

    #[tracing::instrument(
        name = "wallets.service.create_wallet",
        skip(self, wallet),
        fields(owner = %owner, wallet = tracing::field::Empty)
    )]
    async fn create_wallet(
        &self,
        owner: UserUuid,
        wallet: NewWallet,
    ) -> Result<WalletRecord, WalletsServiceError> {
        let uuid = WalletUuid::new();

        tracing::Span::current().record("wallet", tracing::field::display(uuid));

        async {
            let mut tx = self.db.begin_owner_transaction(owner).await?;

            let created = self
                .repository
                .create_wallet(&mut tx, owner, uuid, wallet)
                .await?;

            tx.commit().await?;

            info!(wallet = %created.uuid, "created wallet");

            Ok(created)
        }
        .await
        .inspect_err(report_failure(owner, "create_wallet"))
    }

    #[tracing::instrument(
        name = "wallets.service.update_wallet",
        skip(self, update),
        fields(owner = %owner, wallet = %wallet)
    )]
    async fn update_wallet(
        &self,
        owner: UserUuid,
        wallet: WalletUuid,
        update: WalletUpdate,
    ) -> Result<WalletRecord, WalletsServiceError> {
        async {
            let mut tx = self.db.begin_owner_transaction(owner).await?;

            let updated = self
                .repository
                .update_wallet(&mut tx, owner, wallet, update)
                .await?;

            tx.commit().await?;

            Ok(updated)
        }
        .await
        .inspect_err(report_failure(owner, "update_wallet"))
    }

    #[tracing::instrument(
        name = "wallets.service.delete_wallet",
        skip(self),
        fields(owner = %owner, wallet = %wallet)
    )]
    async fn delete_wallet(
        &self,
        owner: UserUuid,
        wallet: WalletUuid,
    ) -> Result<(), WalletsServiceError> {
        async {
            let mut tx = self.db.begin_owner_transaction(owner).await?;

            let rows_affected = self.repository.delete_wallet(&mut tx, owner, wallet).await?;

            if rows_affected == 0 {
                return Err(WalletsServiceError::NotFound);
            }

            tx.commit().await?;

            info!("deleted wallet");

            Ok(())
        }
        .await
        .inspect_err(report_failure(owner, "delete_wallet"))
    }

    #[tracing::instrument(
        name = "wallets.service.list_wallets",
        skip(self),
        fields(owner = %owner)
    )]
    async fn list_wallets(
        &self,
        owner: UserUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WalletRecord>, WalletsServiceError> {
        async {
            policy::check_limit(limit)?;
            policy::check_offset(offset)?;

            let mut tx = self.db.begin_owner_transaction(owner).await?;

            let wallets = self
                .repository
                .list_wallets(&mut tx, owner, limit, offset)
                .await?;

            tx.commit().await?;

            Ok(wallets)
        }
        .await
        .inspect_err(report_failure(owner, "list_wallets"))
    }

    #[tracing::instrument(
        name = "wallets.service.list_wallets_paginated",
        skip(self, cursor),
        fields(owner = %owner, from_start = cursor.is_start())
    )]
    async fn list_wallets_paginated(
        &self,
        owner: UserUuid,
        cursor: Cursor,
        limit: i64,
    ) -> Result<Vec<WalletRecord>, WalletsServiceError> {
        async {
            policy::check_limit(limit)?;

            let mut tx = self.db.begin_owner_transaction(owner).await?;

            let wallets = if cursor.is_start() {
                self.repository
                    .list_wallets(&mut tx, owner, limit, 0)
                    .await?
            } else {
                self.repository
                    .list_wallets_after(&mut tx, owner, cursor, limit)
                    .await?
            };

            tx.commit().await?;

            Ok(wallets)
        }
        .await
        .inspect_err(report_failure(owner, "list_wallets_paginated"))
    }

    #[tracing::instrument(
        name = "wallets.service.search_wallets",
        skip(self, query),
        fields(owner = %owner)
    )]
    async fn search_wallets(
        &self,
        owner: UserUuid,
        query: String,
        limit: i64,
    ) -> Result<Vec<WalletRecord>, WalletsServiceError> {
        async {
            policy::check_limit(limit)?;

            let term = policy::search_term(&query)?;

            let mut tx = self.db.begin_owner_transaction(owner).await?;

            let wallets = match term {
                Some(term) => {
                    self.repository
                        .search_wallets(&mut tx, owner, term, limit)
                        .await?
                }
                None => {
                    self.repository
                        .list_wallets(&mut tx, owner, limit, 0)
                        .await?
                }
            };

            tx.commit().await?;

            Ok(wallets)
        }
        .await
        .inspect_err(report_failure(owner, "search_wallets"))
    }

    #[tracing::instrument(name = "wallets.service.ping", skip(self), err(level = "warn"))]
    async fn ping(&self) -> Result<(), WalletsServiceError> {
        self.db.ping().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WalletsService: Send + Sync {
    /// Retrieve one of the owner's wallets.
    async fn get_wallet(
        &self,
        owner: UserUuid,
        wallet: WalletUuid,
    ) -> Result<WalletRecord, WalletsServiceError>;

    /// Create a wallet for `owner` with a freshly generated identifier.
    async fn create_wallet(
        &self,
        owner: UserUuid,
        wallet: NewWallet,
    ) -> Result<WalletRecord, WalletsServiceError>;

    /// Replace every editable field of one of the owner's wallets.
    async fn update_wallet(
        &self,
        owner: UserUuid,
        wallet: WalletUuid,
        update: WalletUpdate,
    ) -> Result<WalletRecord, WalletsServiceError>;

    /// Delete one of the owner's wallets.
    async fn delete_wallet(
        &self,
        owner: UserUuid,
        wallet: WalletUuid,
    ) -> Result<(), WalletsServiceError>;

    /// Newest first, skipping `offset` wallets.
    async fn list_wallets(
        &self,
        owner: UserUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WalletRecord>, WalletsServiceError>;

    /// Up to `limit` wallets strictly after `cursor`, newest first.
    ///
    /// A page shorter than `limit` is the end of the sequence. A full page may
    /// or may not be followed by more wallets.
    async fn list_wallets_paginated(
        &self,
        owner: UserUuid,
        cursor: Cursor,
        limit: i64,
    ) -> Result<Vec<WalletRecord>, WalletsServiceError>;

    /// Wallets whose name is similar to `query`, best match first.
    ///
    /// A blank query returns the newest wallets instead.
    async fn search_wallets(
        &self,
        owner: UserUuid,
        query: String,
        limit: i64,
    ) -> Result<Vec<WalletRecord>, WalletsServiceError>;

    /// Check that the wallet store accepts queries.
    ///
    /// A down or saturated store fails with [`WalletsServiceError::Unavailable`].
    async fn ping(&self) -> Result<(), WalletsServiceError>;
}
