//! Application configuration
//!
//! Settings come from a YAML file, with the database DSN taken from the
//! `DATABASE_DSN` environment variable (optionally populated from a dotenv
//! file).

use common::database::DatabaseConfig;
use config::{Config, File, Source};
use serde::Deserialize;
use std::{path::Path, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not load dotenv file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("could not read application config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("DATABASE_DSN must be set")]
    MissingDsn,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_max_header_bytes() -> usize {
    1
}

const fn default_max_body_bytes() -> usize {
    2 << 20
}

const fn default_io_timeout() -> u64 {
    20
}

const fn default_shutdown_timeout() -> u64 {
    5
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Header size bound in megabytes
    #[serde(default = "default_max_header_bytes", alias = "maxheaderbytes")]
    pub max_header_bytes: usize,
    /// Request body bound in bytes
    #[serde(default = "default_max_body_bytes", alias = "maxbodybytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_io_timeout", alias = "readtimeout")]
    pub read_timeout: u64,
    #[serde(default = "default_io_timeout", alias = "writetimeout")]
    pub write_timeout: u64,
    /// How long in-flight requests may drain after a shutdown signal
    #[serde(default = "default_shutdown_timeout", alias = "shutdowntimeout")]
    pub shutdown_timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_header_bytes: default_max_header_bytes(),
            max_body_bytes: default_max_body_bytes(),
            read_timeout: default_io_timeout(),
            write_timeout: default_io_timeout(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl HttpConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Header size bound in bytes
    pub fn max_header_bytes(&self) -> usize {
        self.max_header_bytes << 20
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load the dotenv file, then the YAML config at `config_path`
    pub fn load(config_path: &Path, env_file: &Path) -> Result<Self, ConfigError> {
        info!("loading dotenv file {}", env_file.display());
        match dotenvy::from_path(env_file) {
            Ok(()) => info!("loaded dotenv file"),
            Err(e) if e.not_found() => warn!("dotenv file {} not found", env_file.display()),
            Err(e) => return Err(e.into()),
        }

        info!("reading application config from {}", config_path.display());
        Self::from_source(
            File::from(config_path),
            std::env::var("DATABASE_DSN").ok(),
        )
    }

    fn from_source<S>(source: S, dsn: Option<String>) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(source)
            .set_override_option("database.dsn", dsn)?
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        if config.database.dsn.trim().is_empty() {
            return Err(ConfigError::MissingDsn);
        }

        Ok(config)
    }
}
