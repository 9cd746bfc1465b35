// apps/lojacli/src/main.rs

use clap::{Arg, ArgAction, Command};
use secrecy::SecretString;
use std::process;

use loja_lib::auth::{TokenConfig, DEFAULT_TOKEN_TTL};
use loja_lib::repository::UserRepository;
use loja_lib::rootuser::{initialize_root_user, RootUserConfig};
use loja_lib::util::{connect_with_retry, run_migrations};
use loja_lib::UserService;

const DATABASE_URL: &str = "DATABASE_URL";
const DATABASE_MAX_RETRIES: u32 = 10;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let matches = Command::new("lojacli")
        .about("Loja Games CLI utility")
        .arg(
            Arg::new("migrations")
                .long("migrations")
                .action(ArgAction::SetTrue)
                .help("Execute database migrations"),
        )
        .arg(
            Arg::new("create-root")
                .long("create-root")
                .action(ArgAction::SetTrue)
                .help("Create the root user from ROOT_USER_* environment variables"),
        )
        .arg_required_else_help(true)
        .get_matches();

    if let Err(e) = run(matches.get_flag("migrations"), matches.get_flag("create-root")).await {
        tracing::error!(error = %e, "lojacli failed");
        process::exit(1);
    }
}

async fn run(migrations: bool, create_root: bool) -> Result<(), String> {
    let db_url = std::env::var(DATABASE_URL).map_err(|_| format!("{DATABASE_URL} must be set"))?;
    let pool = connect_with_retry(&db_url, DATABASE_MAX_RETRIES)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;

    if migrations {
        tracing::info!("Running migrations for loja-lib");
        run_migrations(&pool)
            .await
            .map_err(|e| format!("Migration failed: {e}"))?;
        tracing::info!("Migrations applied successfully");
    }

    if create_root {
        let config = RootUserConfig::from_env()?;
        let password = RootUserConfig::password_from_env()?;

        // Registration never signs tokens, so the key is irrelevant here.
        let tokens = TokenConfig::new(SecretString::new(String::new()), DEFAULT_TOKEN_TTL);
        let users = UserService::new(UserRepository::new(pool), tokens);

        let root = initialize_root_user(&users, &config, password)
            .await
            .map_err(|e| format!("Root user creation failed: {e}"))?;
        tracing::info!(user_id = %root.id, email = %root.email, "Root user ready");
    }

    Ok(())
}
