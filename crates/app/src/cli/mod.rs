use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tally_app::database;

mod db;
mod project;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "tally-app", about = "Tally administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
    Project(project::ProjectCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Project(command) => project::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
