use clap::Args;
use tally_app::auth::{AuthService, PgAuthService};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID that should own the token
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_uuid: {}", issued.metadata.user_uuid);
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
