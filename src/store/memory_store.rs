use std::collections::HashMap;

use super::{normalize_username, UserStore};
use crate::error::StoreError;
use crate::model::UserRecord;

/// In-process store, used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    users: HashMap<String, UserRecord>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes an account behind the session's back.
    pub fn remove(&mut self, username: &str) -> Option<UserRecord> {
        self.users.remove(&normalize_username(username))
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Number of upserts so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl UserStore for MemoryStore {
    fn ensure_exists(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn get(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(&normalize_username(username)).cloned())
    }

    fn upsert(&mut self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        self.users
            .insert(normalize_username(username), record.clone());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserOptions;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut store = MemoryStore::new();
        let record = UserRecord::new("hash".to_string(), UserOptions::default());
        store.upsert("Alice", &record).unwrap();

        assert_eq!(store.get("ALICE").unwrap(), Some(record));
        assert!(!store.is_empty());
        assert!(store.remove("alice").is_some());
        assert_eq!(store.get("alice").unwrap(), None);
    }
}
