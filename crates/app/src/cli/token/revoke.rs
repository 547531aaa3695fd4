use clap::Args;
use tally_app::auth::{AuthService, AuthServiceError, PgAuthService};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID that owns the token
    #[arg(long)]
    user_uuid: Uuid,

    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;

    match PgAuthService::new(pool)
        .revoke_api_token(args.user_uuid.into(), args.token_uuid)
        .await
    {
        Ok(()) => println!("revoked token {}", args.token_uuid),
        Err(AuthServiceError::NotFound) => {
            println!("token {} was not active", args.token_uuid);
        }
        Err(error) => return Err(format!("failed to revoke token: {error}")),
    }

    Ok(())
}
