//! Application configuration.
//!
//! Configuration comes from environment variables with local-development
//! defaults. Nothing here is hot-reloaded; the binary reads it once at
//! startup.

use std::net::SocketAddr;
use thiserror::Error;

/// Default bind address for local development.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default database URL for local development.
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/todo_api";

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `BIND_ADDR` was present but not a valid socket address.
    #[error("invalid BIND_ADDR {value:?}: {reason}")]
    InvalidBindAddr {
        /// The offending value.
        value: String,
        /// Parse failure detail.
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection URL (`DATABASE_URL`).
    pub database_url: String,
    /// Socket address to listen on (`BIND_ADDR`).
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to
    /// local-development defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `BIND_ADDR` is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_value =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let bind_addr = bind_value
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: bind_value,
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }

    /// Override the database URL.
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Override the bind address.
    #[must_use]
    pub const fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn builders_override_fields() {
        let config = AppConfig {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.parse().unwrap(),
        }
        .with_database_url("postgres://db/todos")
        .with_bind_addr("127.0.0.1:8080".parse().unwrap());

        assert_eq!(config.database_url, "postgres://db/todos");
        assert_eq!(config.bind_addr.port(), 8080);
    }
}
