//! Generic resource hook.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{RemoveOutcome, Resource};
use crate::api::ApiClient;
use crate::connectivity::Connectivity;
use crate::models::ValidationError;
use crate::store::LocalStore;

struct Snapshot<R> {
    items: Vec<R>,
    error: Option<String>,
    pending_loads: usize,
    /// Bumped by every load start and every applied mutation. A load applies its
    /// result only if the generation it captured is still current.
    generation: u64,
    mounted: bool,
}

enum Loaded<R> {
    Remote(Vec<R>),
    Local(Vec<R>),
    Failed(String),
}

/// Data-access unit for one collection: remote CRUD, local mirror, in-memory snapshot.
///
/// Methods take `&self`; several operations may be in flight at once. The snapshot
/// lock is never held across an `.await`.
pub struct ResourceHook<R: Resource> {
    connectivity: Arc<Connectivity>,
    store: LocalStore,
    state: Mutex<Snapshot<R>>,
}

impl<R: Resource> ResourceHook<R> {
    pub fn new(connectivity: Arc<Connectivity>, store: LocalStore) -> Self {
        Self {
            connectivity,
            store,
            state: Mutex::new(Snapshot {
                items: Vec::new(),
                error: None,
                pending_loads: 0,
                generation: 0,
                mounted: true,
            }),
        }
    }

    pub fn connectivity(&self) -> &Arc<Connectivity> {
        &self.connectivity
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Current snapshot of the collection.
    pub fn items(&self) -> Vec<R> {
        self.lock().items.clone()
    }

    /// Runs `f` over the snapshot without cloning it.
    pub fn with_items<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        f(&self.lock().items)
    }

    pub fn loading(&self) -> bool {
        self.lock().pending_loads > 0
    }

    /// Last load failure. Remote failures that fell back to the mirror are not errors.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// In-memory lookup; never touches the network.
    pub fn get(&self, id: &str) -> Option<R> {
        self.lock().items.iter().find(|item| item.id() == id).cloned()
    }

    /// Number of records in the local mirror, independent of the snapshot.
    pub fn mirrored_len(&self) -> usize {
        self.store.get::<Vec<R>>(R::KEY, Vec::new()).len()
    }

    /// Stops in-flight and future responses from touching the snapshot.
    /// Mutations still complete their local store write.
    pub fn unmount(&self) {
        self.lock().mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    /// Refreshes the snapshot from the API when connected, else from the mirror.
    pub async fn load(&self) {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.pending_loads += 1;
            state.generation
        };

        let loaded = if self.connectivity.connected() {
            match self.api().list::<R>(R::PATH).await {
                Ok(items) => Loaded::Remote(items),
                Err(e) => {
                    tracing::warn!(
                        "Failed to load {} from API, using local mirror: {}",
                        R::PATH,
                        e
                    );
                    self.read_mirror()
                }
            }
        } else {
            tracing::debug!("Offline, loading {} from local mirror", R::PATH);
            self.read_mirror()
        };

        let mut state = self.lock();
        state.pending_loads -= 1;
        if !state.mounted || state.generation != generation {
            tracing::debug!("Discarding superseded {} load", R::PATH);
            return;
        }

        match loaded {
            Loaded::Remote(items) => {
                if let Err(e) = self.store.set(R::KEY, &items) {
                    tracing::warn!("Failed to mirror {} locally: {}", R::PATH, e);
                }
                state.items = items;
                state.error = None;
            }
            Loaded::Local(items) => {
                state.items = items;
                state.error = None;
            }
            Loaded::Failed(message) => {
                state.items = Vec::new();
                state.error = Some(message);
            }
        }
    }

    /// Creates a record remotely, or locally when offline or the call fails.
    pub async fn add(&self, draft: R::Draft) -> Result<R, ValidationError> {
        R::validate_draft(&draft)?;

        let record = if self.connectivity.connected() {
            match self.api().create::<_, R>(R::PATH, &draft).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Failed to create {} via API, saving locally: {}", R::KIND, e);
                    self.synthesize(&draft)
                }
            }
        } else {
            self.synthesize(&draft)
        };

        self.commit(|items| items.push(record.clone()));
        Ok(record)
    }

    /// Applies a patch remotely, or merges it into the local copy when offline or
    /// the call fails. Returns `None` if the record is unknown.
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<Option<R>, ValidationError> {
        if let Some(current) = self.current(id) {
            current.check_patch(&patch)?;
        }

        if self.connectivity.connected() {
            match self.api().update::<_, R>(R::PATH, id, &patch).await {
                Ok(updated) => {
                    self.commit(|items| replace(items, &updated));
                    return Ok(Some(updated));
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to update {} {} via API, patching locally: {}",
                        R::KIND,
                        id,
                        e
                    );
                }
            }
        }

        Ok(self.patch_locally(id, &patch))
    }

    /// Deletes remotely when connected; always removes locally.
    pub async fn remove(&self, id: &str) -> RemoveOutcome {
        let outcome = if self.connectivity.connected() {
            match self.api().delete(R::PATH, id).await {
                Ok(()) => RemoveOutcome::Confirmed,
                Err(e) if e.is_not_found() => {
                    tracing::debug!("{} {} already absent on server", R::KIND, id);
                    RemoveOutcome::AlreadyAbsent
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to delete {} {} via API, removing locally only: {}",
                        R::KIND,
                        id,
                        e
                    );
                    RemoveOutcome::Failed(e.to_string())
                }
            }
        } else {
            RemoveOutcome::LocalOnly
        };

        self.commit(|items| items.retain(|item| item.id() != id));
        outcome
    }

    /// Record from the snapshot, or from the mirror when the snapshot lacks it.
    pub(super) fn current(&self, id: &str) -> Option<R> {
        self.get(id).or_else(|| {
            self.store
                .get::<Vec<R>>(R::KEY, Vec::new())
                .into_iter()
                .find(|item| item.id() == id)
        })
    }

    pub(super) fn not_found(id: &str) -> ValidationError {
        ValidationError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        }
    }

    fn api(&self) -> &ApiClient {
        self.connectivity.api()
    }

    fn synthesize(&self, draft: &R::Draft) -> R {
        R::from_draft(draft, self.store.generate_id(), Utc::now())
    }

    fn read_mirror(&self) -> Loaded<R> {
        match self.store.load::<Vec<R>>(R::KEY) {
            Ok(items) => Loaded::Local(items.unwrap_or_default()),
            Err(e) => {
                tracing::warn!("Failed to read local {}: {}", R::PATH, e);
                Loaded::Failed(e.to_string())
            }
        }
    }

    fn patch_locally(&self, id: &str, patch: &R::Patch) -> Option<R> {
        let now = Utc::now();
        let mut patched = None;
        self.commit(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
                item.apply_patch(patch, now);
                patched = Some(item.clone());
            }
        });
        patched
    }

    /// Applies a mutation to the persisted mirror and, while mounted, to the snapshot.
    ///
    /// The mirror is re-read from the store so a hook that never loaded cannot
    /// overwrite records it does not know about.
    fn commit(&self, mut mutate: impl FnMut(&mut Vec<R>)) {
        let mut state = self.lock();

        let mut mirror: Vec<R> = self.store.get(R::KEY, Vec::new());
        mutate(&mut mirror);
        if let Err(e) = self.store.set(R::KEY, &mirror) {
            tracing::warn!("Failed to write local {}: {}", R::PATH, e);
        }

        if state.mounted {
            mutate(&mut state.items);
            state.generation += 1;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn replace<R: Resource>(items: &mut [R], record: &R) {
    if let Some(slot) = items.iter_mut().find(|item| item.id() == record.id()) {
        *slot = record.clone();
    }
}
