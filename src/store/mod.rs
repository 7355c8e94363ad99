//! Persistence of user accounts.
//!
//! Records are always read and written whole; there is no partial-field update and no
//! concurrency control, so two overlapping writers lose an update.

mod json_file_store;
mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

use crate::error::StoreError;
use crate::model::UserRecord;

pub trait UserStore {
    /// Creates an empty `{"users": {}}` store if there is none yet.
    fn ensure_exists(&mut self) -> Result<(), StoreError>;

    fn get(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Replaces the whole record for `username`, creating it if needed.
    fn upsert(&mut self, username: &str, record: &UserRecord) -> Result<(), StoreError>;
}

/// Usernames are trimmed and case-folded before every lookup.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}
