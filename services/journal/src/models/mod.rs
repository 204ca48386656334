//! Journal service models

pub mod entry;
pub mod payload;
pub mod user;

// Re-export for convenience
pub use entry::{JournalEntry, NewEntry};
pub use payload::{
    CredentialsRequest, DateItem, DatesResponse, LogQuery, LogResponse, MessageResponse,
    NewEntryRequest,
};
pub use user::{NewUser, User};
