use clap::Args;
use tally_app::{
    database::Db,
    domain::projects::{
        PgProjectsService, ProjectsService, data::NewProject, records::ProjectUuid,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProjectArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID that should own the project
    #[arg(long)]
    user_uuid: Uuid,

    /// Project display name
    #[arg(long)]
    name: String,
}

pub(crate) async fn run(args: CreateProjectArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;

    let project = PgProjectsService::new(Db::new(pool))
        .create_project(
            args.user_uuid.into(),
            NewProject {
                uuid: ProjectUuid::new(),
                name: args.name,
            },
        )
        .await
        .map_err(|error| format!("failed to create project: {error}"))?;

    println!("project_uuid: {}", project.uuid);
    println!("project_name: {}", project.name);
    println!("user_uuid: {}", project.owner);

    Ok(())
}
