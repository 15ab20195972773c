//! Application configuration loaded from environment variables.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::storage::FileConnection;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the default data directory; set FARAJA_DATA_DIR")]
    NoDataDirectory,
    #[error("Invalid {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding contributions.json
    pub data_directory: PathBuf,
    /// Directory exported reports are written to
    pub export_directory: PathBuf,
    pub bind_address: SocketAddr,
    /// Default tracing filter, used when RUST_LOG is unset
    pub log_level: String,
    /// Browser origin allowed by CORS
    pub cors_origin: HeaderValue,
    /// Built frontend served for non-API paths, if any
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|value| !value.trim().is_empty()))
    }

    /// Build the configuration from any key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_directory = match lookup("FARAJA_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => FileConnection::default_data_directory().map_err(|_| ConfigError::NoDataDirectory)?,
        };

        let export_directory = lookup("FARAJA_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_directory.join("exports"));

        let bind_value = lookup("FARAJA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_address = bind_value.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "FARAJA_BIND_ADDR",
            value: bind_value.clone(),
            reason: e.to_string(),
        })?;

        let log_level = lookup("FARAJA_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        EnvFilter::try_new(&log_level).map_err(|e| ConfigError::Invalid {
            key: "FARAJA_LOG_LEVEL",
            value: log_level.clone(),
            reason: e.to_string(),
        })?;

        let origin_value = lookup("FARAJA_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&origin_value).map_err(|e| ConfigError::Invalid {
            key: "FARAJA_CORS_ORIGIN",
            value: origin_value.clone(),
            reason: e.to_string(),
        })?;

        let static_dir = lookup("FARAJA_STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            data_directory,
            export_directory,
            bind_address,
            log_level,
            cors_origin,
            static_dir,
        })
    }
}
