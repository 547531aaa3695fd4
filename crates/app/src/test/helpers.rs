//! Test Helpers

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::query;

use crate::{
    domain::{
        users::records::UserUuid,
        wallets::{
            WalletsService, WalletsServiceError,
            data::NewWallet,
            records::{WalletRecord, WalletUuid},
        },
    },
    test::TestContext,
};

/// A valid wallet payload with only the required fields set.
pub(crate) fn new_wallet(name: &str) -> NewWallet {
    NewWallet {
        project: None,
        name: name.to_string(),
        amount: None,
        currency_code: "EUR".to_string(),
        tags: None,
    }
}

pub(crate) async fn create_wallet(
    ctx: &TestContext,
    owner: UserUuid,
    name: &str,
) -> Result<WalletRecord, WalletsServiceError> {
    ctx.wallets.create_wallet(owner, new_wallet(name)).await
}

/// Overwrite a wallet's creation time, bypassing RLS through the superuser pool.
pub(crate) async fn set_created_at(
    ctx: &TestContext,
    wallet: WalletUuid,
    created_at: Timestamp,
) -> Result<(), sqlx::Error> {
    query("UPDATE wallets SET created_at = $2, updated_at = $2 WHERE uuid = $1")
        .bind(wallet.into_uuid())
        .bind(SqlxTimestamp::from(created_at))
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}
