//! Global configuration parsing and validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{AppError, Result};

/// Durable-store backend selection.
///
/// Chosen once at construction time; call sites only ever see the
/// [`crate::persistence::RequestStore`] trait object.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// In-process map, for development and tests.
    Memory,
    /// `SQLite` database file, for production.
    Sqlite,
}

fn default_http_port() -> u16 {
    3000
}

fn default_bind_host() -> String {
    "127.0.0.1".into()
}

fn default_backend() -> StorageBackend {
    StorageBackend::Memory
}

fn default_db_path() -> PathBuf {
    PathBuf::from("approval-relay.db")
}

fn default_client_buffer() -> usize {
    32
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Host address the HTTP server binds to.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    /// HTTP port for the API and `WebSocket` endpoint.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Durable-store backend.
    #[serde(default = "default_backend")]
    pub storage: StorageBackend,
    /// `SQLite` database file path (used when `storage = "sqlite"`).
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Per-observer outbound event buffer depth.
    #[serde(default = "default_client_buffer")]
    pub client_buffer: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            http_port: default_http_port(),
            storage: default_backend(),
            db_path: default_db_path(),
            client_buffer: default_client_buffer(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bind_host.trim().is_empty() {
            return Err(AppError::Config("bind_host must not be empty".into()));
        }
        if self.client_buffer == 0 {
            return Err(AppError::Config(
                "client_buffer must be greater than zero".into(),
            ));
        }
        if self.storage == StorageBackend::Sqlite && self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config(
                "db_path must be set when storage = \"sqlite\"".into(),
            ));
        }
        Ok(())
    }
}
