//! Server configuration.

use std::{env, str::FromStr};

/// Where entity records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Process-local sequences, lost on restart.
    Memory,
    /// SQLite database at `DATABASE_URL`.
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => anyhow::bail!("unknown storage backend: {other}"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Storage backend.
    pub storage: StorageKind,
    /// Database URL.
    pub database_url: String,
    /// Maximum pooled database connections.
    pub db_max_connections: u32,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let storage = env::var("API_STORAGE_BACKEND")
            .unwrap_or_else(|_| "sqlite".to_string())
            .parse()?;

        Ok(Self {
            host: env::var("API_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            storage,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:database.db?mode=rwc".to_string()),
            db_max_connections: env::var("API_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            log_level: env::var("API_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration for tests: in-memory storage on an ephemeral port.
    pub fn in_memory() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            storage: StorageKind::Memory,
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            log_level: "debug".to_string(),
        }
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // SAFETY: Tests run serially or in isolation
        unsafe {
            env::remove_var("API_STORAGE_BACKEND");
            env::remove_var("API_SERVER_PORT");
            env::remove_var("DATABASE_URL");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.storage, StorageKind::Sqlite);
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_url, "sqlite:database.db?mode=rwc");
    }

    #[test]
    fn test_storage_kind_parse() {
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!("SQLite".parse::<StorageKind>().unwrap(), StorageKind::Sqlite);
        assert!("postgres".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_server_addr() {
        let config = Config::in_memory();
        assert_eq!(config.server_addr(), "127.0.0.1:0");
    }
}
