//! Service configuration

use anyhow::{Context, Result};
use common::database::DatabaseConfig;

/// Configuration of the journal service
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind the HTTP listener to
    pub host: String,
    /// Port to bind the HTTP listener to
    pub port: u16,
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl Config {
    /// Create a new Config from environment variables
    ///
    /// # Environment Variables
    /// - `JOURNAL_HOST`: Bind host (default: "0.0.0.0")
    /// - `JOURNAL_PORT`: Bind port (default: 5000)
    /// - database settings, see [`DatabaseConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("JOURNAL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("JOURNAL_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid JOURNAL_PORT: {:?}", raw))?,
            Err(_) => 5000,
        };

        let database = DatabaseConfig::from_env()?;

        Ok(Config {
            host,
            port,
            database,
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
