//! Persistent local store.
//!
//! Durable key-value JSON storage that survives restarts: the auth token,
//! the cached profile, one snapshot per user, and the offline order log.
//! Every value is an opaque JSON blob written under a string key, one file
//! per key inside the configured data directory.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use aurelia_core::{Order, UserProfile, UserSnapshot};

/// Key holding the session token.
const TOKEN_KEY: &str = "auth_token";

/// Key holding the cached profile of the signed-in user.
const USER_INFO_KEY: &str = "user_info";

/// Key holding the append-only offline order log.
const LOCAL_ORDERS_KEY: &str = "local_orders";

/// Errors raised by the local store.
///
/// These are fatal to the operation that triggered the write: silent data
/// loss is worse than a surfaced failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable client-side key-value storage.
///
/// Cheap to clone; all clones share the same data directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: Arc<PathBuf>,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir: Arc::new(dir) })
    }

    // =========================================================================
    // Generic key-value access
    // =========================================================================

    /// Read and decode the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Encode and durably write `value` under `key`.
    ///
    /// The write goes through a temp file and a rename so a crash never
    /// leaves a half-written value behind.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the filesystem write fails.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let raw = serde_json::to_vec(value)?;
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Remove the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// The stored session token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read.
    pub fn auth_token(&self) -> Result<Option<String>, StoreError> {
        self.get(TOKEN_KEY)
    }

    /// Persist the session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_auth_token(&self, token: &str) -> Result<(), StoreError> {
        self.put(TOKEN_KEY, &token)
    }

    /// Drop the stored session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub fn clear_auth_token(&self) -> Result<(), StoreError> {
        self.remove(TOKEN_KEY)
    }

    /// Cache the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_user_info(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.put(USER_INFO_KEY, profile)
    }

    /// Drop the cached profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub fn clear_user_info(&self) -> Result<(), StoreError> {
        self.remove(USER_INFO_KEY)
    }

    /// Load the snapshot for `user_key`, or an empty one if none was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing snapshot cannot be read or decoded.
    pub fn load_snapshot(&self, user_key: &str) -> Result<UserSnapshot, StoreError> {
        Ok(self
            .get(&snapshot_key(user_key))?
            .unwrap_or_default())
    }

    /// Save the full snapshot for `user_key` (last writer wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_snapshot(&self, user_key: &str, snapshot: &UserSnapshot) -> Result<(), StoreError> {
        self.put(&snapshot_key(user_key), snapshot)
    }

    /// Read the offline order log.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing log cannot be read or decoded.
    pub fn local_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.get(LOCAL_ORDERS_KEY)?.unwrap_or_default())
    }

    /// Append an order to the offline order log. The log is append-only:
    /// previously recorded orders are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read back or rewritten.
    pub fn append_local_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.local_orders()?;
        orders.push(order.clone());
        self.put(LOCAL_ORDERS_KEY, &orders)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Storage key for a user's snapshot.
fn snapshot_key(user_key: &str) -> String {
    format!("userdata_{user_key}")
}

/// Map an arbitrary key (user ids are often emails) onto a safe file stem.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
