//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::models::{ApiTokenMetadata, NewApiToken},
    domain::users::records::UserUuid,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_BY_HASH_SQL: &str =
    include_str!("sql/find_active_api_token_by_hash.sql");
const LIST_API_TOKENS_BY_USER_SQL: &str = include_str!("sql/list_api_tokens_by_user.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user_uuid.into_uuid())
            .bind(&token.token_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(FIND_ACTIVE_API_TOKEN_BY_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map(|user| user.map(UserUuid::from_uuid))
    }

    pub(crate) async fn list_api_tokens_by_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_API_TOKENS_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn revoke_api_token(
        &self,
        user: UserUuid,
        token: Uuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(REVOKE_API_TOKEN_SQL)
            .bind(token)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get::<Uuid, _>("user_uuid")?.into(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
