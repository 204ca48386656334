//! Database module for handling PostgreSQL connections and operations
//!
//! This module provides connection configuration, pooling, migrations and
//! health checks for the PostgreSQL database.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::{error, info};

/// Database configuration struct
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL, takes precedence over the individual parts
    pub database_url: Option<String>,
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database user
    pub username: String,
    /// Database password
    pub password: String,
    /// Database name
    pub database: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL connection URL (overrides the `POSTGRES_*` parts)
    /// - `POSTGRES_HOST`: Database host (default: "localhost")
    /// - `POSTGRES_PORT`: Database port (default: 5432)
    /// - `POSTGRES_USER`: Database user (default: "postgres")
    /// - `POSTGRES_PASSWORD`: Database password (default: "postgres")
    /// - `POSTGRES_DB`: Database name (default: "journal")
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 10)
    /// - `DATABASE_MIN_CONNECTIONS`: Minimum number of connections (default: 1)
    /// - `DATABASE_CONNECTION_TIMEOUT`: Acquire timeout in seconds (default: 30)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());

        let port = match env::var("POSTGRES_PORT") {
            Ok(raw) => raw.parse().map_err(|e| {
                DatabaseError::Configuration(format!("Invalid POSTGRES_PORT {:?}: {}", raw, e))
            })?,
            Err(_) => 5432,
        };

        let username = env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string());
        let password = env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "postgres".to_string());
        let database = env::var("POSTGRES_DB").unwrap_or_else(|_| "journal".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let min_connections = env::var("DATABASE_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let connection_timeout = env::var("DATABASE_CONNECTION_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            host,
            port,
            username,
            password,
            database,
            max_connections,
            min_connections,
            connection_timeout,
        })
    }

    /// Build the connection options described by this configuration
    pub fn connect_options(&self) -> DatabaseResult<PgConnectOptions> {
        match &self.database_url {
            Some(url) => url
                .parse()
                .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e))),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.username)
                .password(&self.password)
                .database(&self.database)),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

/// Initialize a PostgreSQL connection pool
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<PgPool>` - PostgreSQL connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    info!(
        "Initializing database connection pool (max: {}, min: {})",
        config.max_connections, config.min_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect_with(config.connect_options()?)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Apply every pending migration of `migrator`
pub async fn run_migrations(pool: &PgPool, migrator: &Migrator) -> DatabaseResult<()> {
    migrator.run(pool).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        DatabaseError::Migration(e)
    })?;

    info!("Database migrations complete");
    Ok(())
}

/// Check database connectivity
///
/// # Arguments
///
/// * `pool` - PostgreSQL connection pool
///
/// # Returns
///
/// * `DatabaseResult<()>` - `Ok` if the database answered, a `Query` error otherwise
pub async fn health_check(pool: &PgPool) -> DatabaseResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database health check failed: {}", e);
            DatabaseError::Query(e)
        })?;

    Ok(())
}
