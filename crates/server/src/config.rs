//! Configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::mysql::MySqlConnectOptions;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 5000).
    pub port: u16,

    /// Connection options for the compound store.
    pub store: StoreConfig,

    /// Upper bound on handling a single request (default: 60s).
    pub request_timeout: Duration,

    /// Path to the Tera templates directory (default: ./templates).
    pub templates_dir: PathBuf,
}

/// Connection options for the MySQL store holding the compound tables.
#[derive(Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,

    /// Bound on connecting and running one statement (default: 30s).
    pub statement_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map(Duration::from_secs)
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let templates_dir = env::var("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        Ok(Self {
            port,
            store: StoreConfig::from_env()?,
            request_timeout,
            templates_dir,
        })
    }
}

impl StoreConfig {
    /// Load store options from `DB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());

        let port = env::var("DB_PORT")
            .unwrap_or_else(|_| "3306".to_string())
            .parse()
            .context("DB_PORT must be a valid u16")?;

        let user = env::var("DB_USER").unwrap_or_else(|_| "root".to_string());
        let password = env::var("DB_PASSWORD").unwrap_or_default();
        let database = env::var("DB_NAME").unwrap_or_else(|_| "chemdb".to_string());

        let statement_timeout = env::var("DB_STATEMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .context("DB_STATEMENT_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            host,
            port,
            user,
            password,
            database,
            statement_timeout,
        })
    }

    /// Build sqlx connect options for a single connection.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}
