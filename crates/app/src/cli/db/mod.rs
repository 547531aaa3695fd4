use clap::{Args, Subcommand};

mod ensure_app_role;
mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),

    /// Create or update the runtime role the API connects as
    EnsureAppRole(ensure_app_role::EnsureAppRoleArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args).await,
        DbSubcommand::EnsureAppRole(args) => ensure_app_role::run(args).await,
    }
}
