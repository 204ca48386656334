//! Common library for the journal service
//!
//! This crate provides the PostgreSQL plumbing shared by the services of the
//! workspace: connection configuration, pooling, migrations and the database
//! error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     health_check(&pool).await?;
//!     println!("Database is reachable");
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
