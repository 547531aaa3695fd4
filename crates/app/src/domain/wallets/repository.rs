//! Wallets Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    cursor::Cursor,
    domain::{
        projects::records::ProjectUuid,
        users::records::UserUuid,
        wallets::{
            data::{NewWallet, WalletUpdate},
            policy::MIN_NAME_SIMILARITY,
            records::{WalletRecord, WalletUuid},
        },
    },
};

const GET_WALLET_SQL: &str = include_str!("sql/get_wallet.sql");
const CREATE_WALLET_SQL: &str = include_str!("sql/create_wallet.sql");
const UPDATE_WALLET_SQL: &str = include_str!("sql/update_wallet.sql");
const DELETE_WALLET_SQL: &str = include_str!("sql/delete_wallet.sql");
const LIST_WALLETS_SQL: &str = include_str!("sql/list_wallets.sql");
const LIST_WALLETS_AFTER_SQL: &str = include_str!("sql/list_wallets_after.sql");
const SEARCH_WALLETS_SQL: &str = include_str!("sql/search_wallets.sql");

/// Every statement binds the owner, alongside the row-level security context
/// set on the transaction.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgWalletsRepository;

impl PgWalletsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        wallet: WalletUuid,
    ) -> Result<WalletRecord, sqlx::Error> {
        query_as::<Postgres, WalletRecord>(GET_WALLET_SQL)
            .bind(wallet.into_uuid())
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "wallets.repository.create_wallet",
        skip(self, tx, wallet),
        fields(has_project = wallet.project.is_some())
    )]
    pub(crate) async fn create_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        uuid: WalletUuid,
        wallet: NewWallet,
    ) -> Result<WalletRecord, sqlx::Error> {
        query_as::<Postgres, WalletRecord>(CREATE_WALLET_SQL)
            .bind(uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(wallet.project.map(ProjectUuid::into_uuid))
            .bind(wallet.name)
            .bind(wallet.amount)
            .bind(wallet.currency_code)
            .bind(wallet.tags)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        wallet: WalletUuid,
        update: WalletUpdate,
    ) -> Result<WalletRecord, sqlx::Error> {
        query_as::<Postgres, WalletRecord>(UPDATE_WALLET_SQL)
            .bind(wallet.into_uuid())
            .bind(owner.into_uuid())
            .bind(update.project.map(ProjectUuid::into_uuid))
            .bind(update.name)
            .bind(update.amount)
            .bind(update.currency_code)
            .bind(update.tags)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        wallet: WalletUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WALLET_SQL)
            .bind(wallet.into_uuid())
            .bind(owner.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_wallets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WalletRecord>, sqlx::Error> {
        query_as::<Postgres, WalletRecord>(LIST_WALLETS_SQL)
            .bind(owner.into_uuid())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    /// Wallets strictly after `cursor` in `(created_at, uuid)` descending order.
    ///
    /// `uuid` compares bytewise, which matches the ordering of the canonical
    /// lowercase string form.
    pub(crate) async fn list_wallets_after(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        cursor: Cursor,
        limit: i64,
    ) -> Result<Vec<WalletRecord>, sqlx::Error> {
        query_as::<Postgres, WalletRecord>(LIST_WALLETS_AFTER_SQL)
            .bind(owner.into_uuid())
            .bind(SqlxTimestamp::from(cursor.created_at))
            .bind(cursor.uuid)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "wallets.repository.search_wallets",
        skip(self, tx, term),
        fields(term_chars = term.chars().count(), match_count = tracing::field::Empty)
    )]
    pub(crate) async fn search_wallets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        term: &str,
        limit: i64,
    ) -> Result<Vec<WalletRecord>, sqlx::Error> {
        let wallets = query_as::<Postgres, WalletRecord>(SEARCH_WALLETS_SQL)
            .bind(owner.into_uuid())
            .bind(term)
            .bind(MIN_NAME_SIMILARITY)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("match_count", wallets.len());

        Ok(wallets)
    }
}

impl<'r> FromRow<'r, PgRow> for WalletRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WalletUuid::from_uuid(row.try_get("uuid")?),
            owner: UserUuid::from_uuid(row.try_get("user_uuid")?),
            project: row
                .try_get::<Option<Uuid>, _>("project_uuid")?
                .map(ProjectUuid::from_uuid),
            name: row.try_get("name")?,
            amount: row.try_get("amount")?,
            currency_code: row.try_get("currency_code")?,
            tags: row.try_get("tags")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
