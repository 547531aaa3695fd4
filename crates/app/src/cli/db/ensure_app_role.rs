use clap::Args;
use sqlx::{query, query_scalar};

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Runtime role name
    #[arg(long, default_value = "tally_app")]
    role_name: String,

    /// Runtime role password
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.role_name.trim().is_empty() {
        return Err("role_name cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = crate::cli::connect(&args.database_url).await?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    // Role identifiers cannot be bound as parameters.
    let role: String = query_scalar("SELECT quote_ident($1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to quote role_name: {error}"))?;

    let password: String = query_scalar("SELECT quote_literal($1)")
        .bind(&args.password)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to quote password: {error}"))?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to check role existence: {error}"))?;

    let verb = if exists { "ALTER" } else { "CREATE" };
    let database = current_database(&mut tx).await?;

    // The API must never be able to bypass the owner isolation policies.
    let statements = [
        format!(
            "{verb} ROLE {role} LOGIN PASSWORD {password} \
             NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS"
        ),
        format!("GRANT CONNECT ON DATABASE {database} TO {role}"),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role}"),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public \
             GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role}"
        ),
    ];

    for sql in statements {
        query(&sql)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to apply `{verb} ROLE`/grant statement: {error}"))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit changes: {error}"))?;

    println!("ensured app role: {}", args.role_name);

    Ok(())
}

async fn current_database(tx: &mut sqlx::PgConnection) -> Result<String, String> {
    query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))
}
