//! Server configuration.
//!
//! Loaded from a camelCase JSON file (every key optional):
//!
//! ```json
//! { "port": 8080, "cacheSize": 50, "idleTimeMs": 300000 }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors (fatal at startup)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("idleTimeMs must be greater than zero")]
    ZeroIdleTime,
}

/// Runtime settings of the relay server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to listen on
    pub port: u16,
    /// Maximum number of chat messages kept for backfill
    pub cache_size: usize,
    /// Inactivity timeout per connection, in milliseconds
    pub idle_time_ms: u64,
    /// Upper bound on the shutdown drain, in milliseconds
    pub shutdown_grace_ms: u64,
    /// Optional log file, appended to alongside stdout
    pub log_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cache_size: 50,
            idle_time_ms: 300_000,
            shutdown_grace_ms: 5_000,
            log_file: None,
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the invariants the server relies on.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.idle_time_ms == 0 {
            return Err(ConfigError::ZeroIdleTime);
        }
        Ok(self)
    }

    pub fn idle_time(&self) -> Duration {
        Duration::from_millis(self.idle_time_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
