use log::{debug, info};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::{normalize_username, UserStore};
use crate::error::StoreError;
use crate::model::UserRecord;

/// Flat JSON file `{"users": {<username>: <record>}}`, rewritten in full on every upsert.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_document(&mut self) -> Result<Value, StoreError> {
        self.ensure_exists()?;
        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let document: Value = serde_json::from_str(&contents)?;
        if !document.get("users").map(Value::is_object).unwrap_or(false) {
            return Err(StoreError::MissingUsersContainer);
        }
        Ok(document)
    }

    fn write_document(&self, document: &Value) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(document)?;
        // write next to the target then rename, so a failed write leaves the old file intact
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

impl UserStore for JsonFileStore {
    fn ensure_exists(&mut self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        info!(target: "store", "Creating user store at {:?}", self.path);
        self.write_document(&json!({ "users": {} }))
    }

    fn get(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let username = normalize_username(username);
        let document = self.read_document()?;
        match document["users"].get(&username) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    fn upsert(&mut self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        let username = normalize_username(username);
        let mut document = self.read_document()?;
        let users: &mut Map<String, Value> = document
            .get_mut("users")
            .and_then(Value::as_object_mut)
            .ok_or(StoreError::MissingUsersContainer)?;
        users.insert(username.clone(), serde_json::to_value(record)?);
        debug!(target: "store", "Rewriting record for {}", username);
        self.write_document(&document)
    }
}
