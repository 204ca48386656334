//! Application state shared across handlers

use std::sync::Arc;

use crate::repositories::{JournalStore, UserStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub entries: Arc<dyn JournalStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, entries: Arc<dyn JournalStore>) -> Self {
        Self { users, entries }
    }
}
