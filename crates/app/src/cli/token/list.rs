use clap::Args;
use tally_app::auth::{AuthService, PgAuthService};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;

    let tokens = PgAuthService::new(pool)
        .list_api_tokens(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("created_at: {}", token.created_at);
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
