//! Repositories for database operations
//!
//! Handlers only see the [`UserStore`] and [`JournalStore`] traits; the
//! PostgreSQL repositories are plugged in at startup.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{JournalEntry, NewEntry, NewUser, User};

pub mod journal;
#[cfg(test)]
pub mod memory;
pub mod user;

pub use journal::JournalRepository;
pub use user::UserRepository;

/// Errors raised by the stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// The username is already taken
    #[error("username {0} already exists")]
    DuplicateUsername(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Type alias for store results
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence of user credentials
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; fails with [`StoreError::DuplicateUsername`] when the
    /// username is taken
    async fn create(&self, new_user: &NewUser) -> StoreResult<User>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}

/// Persistence of journal entries
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Insert an entry
    async fn create(&self, new_entry: &NewEntry) -> StoreResult<JournalEntry>;

    /// All entries of a user, in insertion order
    async fn list_by_owner(&self, owner_id: i32) -> StoreResult<Vec<JournalEntry>>;
}
