//! Configuration management for the contact book.
//!
//! Both binaries load their settings from environment variables, after
//! reading a `.env` file if one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which document store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "sqlite" => Ok(StoreKind::Sqlite),
            other => Err(format!("Must be \"memory\" or \"sqlite\", got: {}", other)),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Memory => f.write_str("memory"),
            StoreKind::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Configuration for the server and the client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address (default: "0.0.0.0")
    pub bind_addr: String,

    /// Listen port (default: 3001)
    pub port: u16,

    /// Document store backend (default: memory)
    pub store: StoreKind,

    /// SQLite database file, used with the sqlite store (default: "contacts.db")
    pub sqlite_path: String,

    /// Collection holding contact documents (default: "contacts")
    pub collection: String,

    /// Whether listing an empty collection answers 404 (default: true)
    pub empty_list_not_found: bool,

    /// Base URL the client talks to (default: "http://localhost:3001")
    pub api_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACT_BIND_ADDR`: listen address (default: "0.0.0.0")
    /// - `PORT`: listen port (default: 3001)
    /// - `CONTACT_STORE`: "memory" or "sqlite" (default: "memory")
    /// - `CONTACT_SQLITE_PATH`: SQLite file, ":memory:" allowed (default: "contacts.db")
    /// - `CONTACT_COLLECTION`: collection name (default: "contacts")
    /// - `CONTACT_EMPTY_LIST_NOT_FOUND`: 404 on an empty list (default: true)
    /// - `CONTACT_API_URL`: client base URL (default: "http://localhost:3001")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let bind_addr = env::var("CONTACT_BIND_ADDR").unwrap_or(defaults.bind_addr);
        if bind_addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_BIND_ADDR".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let port = Self::parse_env("PORT", defaults.port, "Must be a port number")?;

        let store = match env::var("CONTACT_STORE") {
            Ok(val) => val.parse::<StoreKind>().map_err(|reason| ConfigError::InvalidValue {
                var: "CONTACT_STORE".to_string(),
                reason,
            })?,
            Err(_) => defaults.store,
        };

        let sqlite_path = env::var("CONTACT_SQLITE_PATH").unwrap_or(defaults.sqlite_path);

        let collection = env::var("CONTACT_COLLECTION").unwrap_or(defaults.collection);
        if collection.is_empty()
            || !collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_COLLECTION".to_string(),
                reason: format!("Must match [A-Za-z0-9_]+, got: {}", collection),
            });
        }

        let empty_list_not_found =
            Self::parse_env_bool("CONTACT_EMPTY_LIST_NOT_FOUND", defaults.empty_list_not_found)?;

        let api_url = env::var("CONTACT_API_URL").unwrap_or(defaults.api_url);
        Self::check_url("CONTACT_API_URL", &api_url)?;

        let request_timeout = Self::parse_env(
            "REQUEST_TIMEOUT",
            defaults.request_timeout,
            "Must be a positive number",
        )?;

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            bind_addr,
            port,
            store,
            sqlite_path,
            collection,
            empty_list_not_found,
            api_url,
            request_timeout,
            log_level,
        })
    }

    /// `host:port` the server listens on.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Reject anything that is not an http(s) URL.
    pub fn check_url(var_name: &str, url: &str) -> ConfigResult<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// Parse an environment variable with a default value.
    fn parse_env<T: FromStr>(var_name: &str, default: T, expected: &str) -> ConfigResult<T> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("{}, got: {}", expected, val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 3001,
            store: StoreKind::Memory,
            sqlite_path: "contacts.db".to_string(),
            collection: "contacts".to_string(),
            empty_list_not_found: true,
            api_url: "http://localhost:3001".to_string(),
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}
