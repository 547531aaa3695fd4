use clap::Args;
use tally_app::{
    auth::{AuthService, PgAuthService},
    domain::users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// User display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,

    /// Skip issuing an initial API token
    #[arg(long)]
    without_token: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;

    let uuid = args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid);

    let user = PgUsersService::new(pool.clone())
        .create_user(NewUser {
            uuid,
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);

    if args.without_token {
        return Ok(());
    }

    let issued = PgAuthService::new(pool)
        .issue_api_token(user.uuid)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
