use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod error;
mod models;
mod password;
mod repositories;
mod routes;
mod server;
mod services;
mod state;
mod validation;

use common::database::{close_pool, health_check, init_pool};

use crate::{config::AppConfig, state::AppState};

/// ReadyRead bookstore backend
#[derive(Parser, Debug)]
#[command(name = "bookstore", about = "ReadyRead bookstore backend", version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config/config.yml")]
    config_path: PathBuf,

    /// Dotenv file providing DATABASE_DSN
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting bookstore service");

    let config = AppConfig::load(&cli.config_path, &cli.env_file)?;

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;

    // Check database connectivity
    if let Err(e) = health_check(&pool, config.database.request_timeout()).await {
        anyhow::bail!("Failed to connect to database: {}", e);
    }
    info!("Database connection successful");

    let state = AppState::new(pool.clone(), config.database.request_timeout());
    let app = routes::create_router(state, &config.http);

    let listener = TcpListener::bind(config.http.address()).await?;
    info!("Bookstore service listening on {}", config.http.address());

    server::run(listener, app, config.http.shutdown_timeout()).await?;

    close_pool(&pool, config.database.shutdown_timeout()).await;
    info!("Bookstore service stopped");

    Ok(())
}
