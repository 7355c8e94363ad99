use log::{info, warn};

use super::account::{hash_password, validate_password, validate_username, verify_password};
use crate::error::{AccountError, StoreError};
use crate::model::{UserOptions, UserRecord};
use crate::store::{normalize_username, UserStore};

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveUser {
    pub username: String,
    pub options: UserOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    Created,
    SignedIn,
}

/// Who is playing. Passed to whatever needs the current user; empty when signed out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    user: Option<ActiveUser>,
}

impl SessionContext {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    pub fn user(&self) -> Option<&ActiveUser> {
        self.user.as_ref()
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(target: "session", "Signed out {}", user.username);
        }
    }

    /// Whether the sign-in form should offer "create account" or "sign in".
    pub fn account_exists<S: UserStore>(store: &mut S, username: &str) -> Result<bool, StoreError> {
        Ok(store.get(username)?.is_some())
    }

    /// Signs into an existing account, or creates it with `defaults` as its options.
    /// New accounts must pass the username and password rules.
    pub fn sign_in<S: UserStore>(
        &mut self,
        store: &mut S,
        username: &str,
        password: &str,
        defaults: &UserOptions,
    ) -> Result<SignInOutcome, AccountError> {
        let username = normalize_username(username);
        let (record, outcome) = match store.get(&username)? {
            None => {
                validate_password(password)?;
                validate_username(&username)?;
                let record = UserRecord::new(hash_password(password), defaults.clone());
                store.upsert(&username, &record)?;
                info!(target: "session", "Created account {}", username);
                (record, SignInOutcome::Created)
            }
            Some(record) => {
                if !verify_password(password, &record.password_hash) {
                    return Err(AccountError::IncorrectPassword);
                }
                info!(target: "session", "Signed in {}", username);
                (record, SignInOutcome::SignedIn)
            }
        };

        self.user = Some(ActiveUser {
            username,
            options: record.options,
        });
        Ok(outcome)
    }

    /// Reads the signed-in user's record. A record that has disappeared from the store
    /// signs the session out and yields `None`.
    pub fn load_record<S: UserStore>(
        &mut self,
        store: &mut S,
    ) -> Result<Option<(String, UserRecord)>, StoreError> {
        let Some(username) = self.username().map(str::to_string) else {
            return Ok(None);
        };
        match store.get(&username)? {
            Some(record) => Ok(Some((username, record))),
            None => {
                warn!(target: "session", "Record for {} is gone; signing out", username);
                self.sign_out();
                Ok(None)
            }
        }
    }

    /// Read-modify-write of the current user's options. Returns `false` when nothing was
    /// saved because no one is signed in (any more).
    pub fn update_options<S, F>(&mut self, store: &mut S, change: F) -> Result<bool, StoreError>
    where
        S: UserStore,
        F: FnOnce(&mut UserOptions),
    {
        let Some((username, mut record)) = self.load_record(store)? else {
            return Ok(false);
        };
        change(&mut record.options);
        store.upsert(&username, &record)?;
        if let Some(user) = self.user.as_mut() {
            user.options = record.options;
        }
        Ok(true)
    }

    pub fn save_options<S: UserStore>(
        &mut self,
        store: &mut S,
        volume: u8,
        theme: &str,
    ) -> Result<bool, StoreError> {
        self.update_options(store, |options| {
            options.volume = volume;
            options.theme = theme.to_string();
        })
    }

    pub fn hide_track<S: UserStore>(&mut self, store: &mut S, track: &str) -> Result<bool, StoreError> {
        self.update_options(store, |options| {
            if !options.hidden_music.iter().any(|hidden| hidden == track) {
                options.hidden_music.push(track.to_string());
            }
        })
    }

    pub fn unhide_track<S: UserStore>(&mut self, store: &mut S, track: &str) -> Result<bool, StoreError> {
        self.update_options(store, |options| {
            options.hidden_music.retain(|hidden| hidden != track);
        })
    }
}
