//! Journal entry model and the date key used to look entries up

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::HashMap;

/// `dd-mm-yy-HH:MM:SS`, used both when listing dates and when looking an entry up
pub const DATE_FORMAT: &str = "%d-%m-%y-%H:%M:%S";

/// Maximum title length, in characters
pub const MAX_TITLE_LEN: usize = 50;

/// Journal entry entity
#[derive(Debug, Clone, FromRow)]
pub struct JournalEntry {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: i32,
}

impl JournalEntry {
    /// Creation timestamp rendered with [`DATE_FORMAT`]
    pub fn formatted_date(&self) -> String {
        self.created_at.format(DATE_FORMAT).to_string()
    }
}

/// New journal entry payload
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub owner_id: i32,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Key entries by their formatted creation date.
///
/// Entries created within the same second share a key; the one that comes
/// last in `entries` wins.
pub fn index_by_date(entries: Vec<JournalEntry>) -> HashMap<String, JournalEntry> {
    entries
        .into_iter()
        .map(|entry| (entry.formatted_date(), entry))
        .collect()
}
