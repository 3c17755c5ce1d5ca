//! Resource hooks: remote CRUD with a local mirror.
//!
//! Each hook owns an in-memory snapshot of one collection. Reads prefer the
//! remote API when [`Connectivity`](crate::Connectivity) reports it reachable and
//! degrade to the local mirror otherwise. Writes degrade to a durable local write
//! rather than failing.
//!
//! Records created locally while offline are not pushed to the server when it
//! comes back; there is no reconciliation between the two stores.

mod exercises;
mod hook;
mod workouts;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::ValidationError;
use crate::store::StorageKey;

pub use exercises::ExerciseHook;
pub use hook::ResourceHook;
pub use workouts::WorkoutHook;

/// A record type served by the remote API and mirrored locally.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Input for `add`, without id or timestamps.
    type Draft: Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Input for `update`; present fields replace current ones.
    type Patch: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Local store key of the mirror.
    const KEY: StorageKey;
    /// Collection path on the remote API.
    const PATH: &'static str;
    /// Human-readable name used in messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn validate_draft(draft: &Self::Draft) -> Result<(), ValidationError>;

    /// Checks a patch against the current record.
    fn check_patch(&self, patch: &Self::Patch) -> Result<(), ValidationError>;

    fn from_draft(draft: &Self::Draft, id: String, now: DateTime<Utc>) -> Self;

    fn apply_patch(&mut self, patch: &Self::Patch, now: DateTime<Utc>);
}

/// What happened on the remote side of a `remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The server deleted the record.
    Confirmed,
    /// The server answered 404; the record was already gone.
    AlreadyAbsent,
    /// The server call failed; the record was removed locally only.
    Failed(String),
    /// Not connected; the record was removed locally only.
    LocalOnly,
}
