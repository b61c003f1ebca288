use clap::{Parser, Subcommand};

use crate::app::{router, AppState};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "taskboard-api")]
#[command(about = "Task board REST API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply migrations and serve the API (default)")]
    Serve {
        #[arg(long, env = "API_HOST", help = "Address to bind")]
        host: Option<String>,

        #[arg(long, env = "API_PORT", help = "Port to listen on")]
        port: Option<u16>,
    },

    #[command(about = "Apply pending migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Migrate => migrate(&config).await,
    }
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database).await?;
    db.migrate().await?;
    tracing::info!("Migrations applied to {}", config.database.url);
    db.close().await;
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database).await?;
    db.migrate().await?;

    let bind_addr = config.bind_addr();
    let state = AppState::new(db.clone(), config)?;
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Task board API listening on http://{}", bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
