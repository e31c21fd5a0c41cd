//! Common library for the ReadyRead services
//!
//! This crate provides shared functionality used by the bookstore service:
//! PostgreSQL connectivity, per-query deadlines and the storage error
//! taxonomy.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     health_check(&pool, config.request_timeout()).await?;
//!     println!("Database is reachable");
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
