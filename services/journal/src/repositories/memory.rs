//! In-memory stores used by the handler tests

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{JournalStore, StoreError, StoreResult, UserStore};
use crate::models::{JournalEntry, NewEntry, NewUser, User};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(StoreError::DuplicateUsername(new_user.username.clone()));
        }

        let user = User {
            id: users.len() as i32 + 1,
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[derive(Default)]
pub struct MemoryJournalStore {
    entries: Mutex<Vec<JournalEntry>>,
}

#[async_trait]
impl JournalStore for MemoryJournalStore {
    async fn create(&self, new_entry: &NewEntry) -> StoreResult<JournalEntry> {
        let mut entries = self.entries.lock().await;
        let entry = JournalEntry {
            id: entries.len() as i32 + 1,
            title: new_entry.title.clone(),
            body: new_entry.body.clone(),
            created_at: new_entry.created_at,
            owner_id: new_entry.owner_id,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_by_owner(&self, owner_id: i32) -> StoreResult<Vec<JournalEntry>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
