//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, AuthServiceError, IssuedApiToken, NewApiToken, format_api_token,
        generate_api_token_secret, hash_api_token, parse_api_token,
        repository::PgAuthRepository,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(name = "auth.authenticate_bearer", skip_all, err(level = "debug"))]
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        parse_api_token(bearer_token).map_err(|_ignored| AuthServiceError::NotFound)?;

        self.repository
            .find_user_by_token_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)
    }

    async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let token = format_api_token(&generate_api_token_secret());

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: Uuid::now_v7(),
                user_uuid: user,
                token_hash: hash_api_token(&token),
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user)
            .await
            .map_err(AuthServiceError::from)
    }

    async fn revoke_api_token(&self, user: UserUuid, token: Uuid) -> Result<(), AuthServiceError> {
        self.repository
            .revoke_api_token(user, token)
            .await?
            .map(|_revoked| ())
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the owning user of an active bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;

    /// Issue a new API token for the user. The raw token is only returned here.
    async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError>;

    /// List all tokens, active or revoked, belonging to the user.
    async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError>;

    /// Revoke one of the user's active tokens.
    async fn revoke_api_token(&self, user: UserUuid, token: Uuid) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn issued_token_authenticates_as_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let issued = auth.issue_api_token(ctx.user_uuid).await?;

        assert_eq!(issued.metadata.user_uuid, ctx.user_uuid);
        assert!(issued.metadata.revoked_at.is_none());
        assert_eq!(auth.authenticate_bearer(&issued.token).await?, ctx.user_uuid);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn well_formed_unknown_token_is_not_found() {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let token = format_api_token(&generate_api_token_secret());
        let result = auth.authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn malformed_token_is_not_found() {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let result = auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn revoked_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let issued = auth.issue_api_token(ctx.user_uuid).await?;

        auth.revoke_api_token(ctx.user_uuid, issued.metadata.uuid)
            .await?;

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let tokens = auth.list_api_tokens(ctx.user_uuid).await?;

        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].revoked_at.is_some(), "token should be revoked");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn revoking_another_users_token_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());
        let other = ctx.create_user("Other User").await;

        let issued = auth.issue_api_token(ctx.user_uuid).await?;
        let result = auth.revoke_api_token(other, issued.metadata.uuid).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(auth.authenticate_bearer(&issued.token).await?, ctx.user_uuid);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn issuing_for_unknown_user_fails() {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let result = auth.issue_api_token(UserUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }
}
