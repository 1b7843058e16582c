//! Combined binary for development - runs all services in one process.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Head start given to a service before its dependents connect to it
const STARTUP_DELAY: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "course-manager")]
#[command(about = "Course manager: registrar, auth and gateway in one process")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "3000")]
        gateway_port: u16,
        #[arg(long, default_value = "50051")]
        auth_port: u16,
        #[arg(long, default_value = "50052")]
        registrar_port: u16,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for registrar_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            auth_port,
            registrar_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:           http://{}:{}", host, gateway_port);
            info!("  Auth service:      http://{}:{}", host, auth_port);
            info!("  Registrar service: http://{}:{}", host, registrar_port);

            // Registrar owns the database and runs migrations on startup
            let registrar_host = host.clone();
            let registrar_handle = tokio::spawn(async move {
                if let Err(e) =
                    registrar_service_lib::run_embedded(&registrar_host, registrar_port).await
                {
                    error!("Registrar service failed: {}", e);
                }
            });

            tokio::time::sleep(STARTUP_DELAY).await;

            let auth_host = host.clone();
            let auth_handle = tokio::spawn(async move {
                if let Err(e) =
                    auth_service_lib::run_embedded(&auth_host, auth_port, registrar_port).await
                {
                    error!("Auth service failed: {}", e);
                }
            });

            tokio::time::sleep(STARTUP_DELAY).await;

            let gateway_host = host.clone();
            let gateway_handle = tokio::spawn(async move {
                if let Err(e) = gateway_lib::run_embedded(
                    &gateway_host,
                    gateway_port,
                    auth_port,
                    registrar_port,
                )
                .await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Any service exiting means the process is broken
            tokio::select! {
                _ = registrar_handle => {
                    error!("Registrar service exited unexpectedly");
                }
                _ = auth_handle => {
                    error!("Auth service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            registrar_service_lib::run_migrations(action.into()).await?;
        }
    }

    Ok(())
}
