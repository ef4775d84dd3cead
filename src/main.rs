//! User Service - Application entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service::api::{create_router, AppState};
use user_service::config::Config;
use user_service::infra::Database;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User account service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    tracing::debug!("Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => {
            serve(
                config.clone(),
                host.unwrap_or_else(|| config.server_host.clone()),
                port.unwrap_or(config.server_port),
            )
            .await?;
        }
        Commands::Migrate { action } => {
            migrate(&config, action).await?;
        }
    }

    Ok(())
}

/// Start the HTTP server
async fn serve(config: Config, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting server...");

    let database = Arc::new(Database::connect(&config).await);
    let app_state = AppState::from_config(database, &config);
    let app = create_router(app_state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a migration command
async fn migrate(
    config: &Config,
    action: MigrateCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::connect_without_migrations(config).await?;

    match action {
        MigrateCommands::Up => {
            database.run_migrations().await?;
            tracing::info!("Migrations applied");
        }
        MigrateCommands::Down => {
            database.rollback_migration().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateCommands::Status => {
            for (name, applied) in database.migration_status().await? {
                let marker = if applied { "applied" } else { "pending" };
                tracing::info!("{:<60} {}", name, marker);
            }
        }
        MigrateCommands::Fresh => {
            database.fresh_migrations().await?;
            tracing::info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
