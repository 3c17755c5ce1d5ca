//! Durable local key/value store with JSON-encoded values.
//!
//! This is the on-device fallback used when the remote API is unreachable.
//! Values are kept as JSON strings under the fixed keys in [`StorageKey`]:
//! - `liftlog_exercises`: array of exercises
//! - `liftlog_workouts`: array of workouts
//! - `liftlog_workout_sessions`, `liftlog_active_session`, `liftlog_templates`
//!
//! Reads never fail: a missing key, malformed JSON, or a backend read error all
//! yield the caller's default.

mod backend;
mod key;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use key::StorageKey;

/// Prefix for ids generated on this device.
pub const LOCAL_ID_PREFIX: &str = "local-";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode value for {0}: {1}")]
    Encode(StorageKey, #[source] serde_json::Error),
}

/// Handle to the local store. Clones share the same backend.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// In-memory store; contents vanish with the last handle.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// File-backed store rooted at `data_dir`.
    pub fn file(data_dir: PathBuf) -> Self {
        Self::new(Arc::new(FileBackend::new(data_dir)))
    }

    pub fn backend(&self) -> &dyn KeyValueBackend {
        self.backend.as_ref()
    }

    /// Reads and decodes a value.
    ///
    /// Returns `Ok(None)` for a missing key or malformed JSON (logged).
    /// Returns `Err` only when the backend itself fails.
    pub fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.read(key.as_str())? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring malformed value under {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Reads a value, falling back to `default` on any problem.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                default
            }
        }
    }

    /// Encodes and writes a value, replacing whatever was there.
    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Encode(key, e))?;
        self.backend.write(key.as_str(), &raw)
    }

    /// Removes a key. Absent keys are not an error.
    pub fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.backend.delete(key.as_str())
    }

    /// Generates an opaque id for a record created on this device.
    pub fn generate_id(&self) -> String {
        generate_id()
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}

/// Unique id with the [`LOCAL_ID_PREFIX`], distinct from server-assigned ids.
pub fn generate_id() -> String {
    format!("{}{}", LOCAL_ID_PREFIX, Uuid::new_v4().simple())
}

/// True for ids produced by [`generate_id`].
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}
