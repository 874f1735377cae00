/// Configuration management for the gradebook
///
/// Handles server binding and the storage connection. Every value can be
/// overridden from the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Storage connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection string (e.g., "sqlite://data/gradebook.db")
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Per-statement deadline in milliseconds
    pub statement_timeout_ms: u64,
    /// How long a caller waits for a free pooled connection, in milliseconds
    pub acquire_timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("GRADEBOOK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or("GRADEBOOK_PORT", 3004),
            },
            database: DatabaseConfig {
                url: std::env::var("GRADEBOOK_DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://data/gradebook.db".to_string()),
                max_connections: env_or("GRADEBOOK_MAX_CONNECTIONS", 5),
                statement_timeout_ms: env_or("GRADEBOOK_STATEMENT_TIMEOUT_MS", 5000),
                acquire_timeout_ms: env_or("GRADEBOOK_ACQUIRE_TIMEOUT_MS", 5000),
            },
        }
    }
}

/// Read and parse an environment variable, falling back when unset or malformed
fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(fallback)
}
