//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, STORE_MEMORY, STORE_POSTGRES,
};

/// Which document store backs the branch repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SeaORM over Postgres
    Postgres,
    /// In-process store, state is lost on exit
    Memory,
}

impl StoreBackend {
    /// Parse a `BRANCH_STORE` value; unknown values fall back to Postgres.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            STORE_MEMORY => StoreBackend::Memory,
            STORE_POSTGRES => StoreBackend::Postgres,
            other => {
                tracing::warn!(value = %other, "Unknown BRANCH_STORE, using postgres");
                StoreBackend::Postgres
            }
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub store: StoreBackend,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("store", &self.store)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            store: StoreBackend::Postgres,
        }
    }
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            store: env::var("BRANCH_STORE")
                .map(|v| StoreBackend::parse(&v))
                .unwrap_or(StoreBackend::Postgres),
        }
    }

    /// Replace the bind address with values given on the command line.
    pub fn with_server_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server_host = host;
        }
        if let Some(port) = port {
            self.server_port = port;
        }
        self
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_known_values() {
        assert_eq!(StoreBackend::parse("memory"), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse(" MEMORY "), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse("postgres"), StoreBackend::Postgres);
        assert_eq!(StoreBackend::parse("mongo"), StoreBackend::Postgres);
    }

    #[test]
    fn debug_output_redacts_database_url() {
        let config = Config {
            database_url: "postgres://admin:hunter2@db/branches".to_string(),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 9000,
            ..Config::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn command_line_overrides_environment_address() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 9000,
            ..Config::default()
        };

        let kept = config.clone().with_server_overrides(None, None);
        assert_eq!(kept.server_addr(), "127.0.0.1:9000");

        let port_only = config.clone().with_server_overrides(None, Some(9100));
        assert_eq!(port_only.server_addr(), "127.0.0.1:9100");

        let both = config.with_server_overrides(Some("0.0.0.0".to_string()), Some(80));
        assert_eq!(both.server_addr(), "0.0.0.0:80");
    }
}
