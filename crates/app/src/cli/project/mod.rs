use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct ProjectCommand {
    #[command(subcommand)]
    command: ProjectSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProjectSubcommand {
    Create(create::CreateProjectArgs),
}

pub(crate) async fn run(command: ProjectCommand) -> Result<(), String> {
    match command.command {
        ProjectSubcommand::Create(args) => create::run(args).await,
    }
}
