use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{key_range, CursorLease, StateEntry, StateIterator, StateStore};

/// In-memory, `BTreeMap`-based state store.
///
/// Intended for tests and embedding. State is held behind a `RwLock`; range
/// cursors iterate over a snapshot taken when the cursor is opened.
pub struct InMemoryStateStore {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    open_cursors: Arc<AtomicUsize>,
}

impl InMemoryStateStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.state.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Number of range cursors that have not yet been released.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for InMemoryStateStore {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut map = self.state.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_string(), value.to_vec());
        debug!(key, bytes = value.len(), "put state");
        Ok(())
    }

    fn put_state_if(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StoreResult<bool> {
        let mut map = self.state.write().map_err(|_| StoreError::Poisoned)?;
        if map.get(key).map(Vec::as_slice) != expected {
            debug!(key, "conditional put rejected: value changed");
            return Ok(false);
        }
        map.insert(key.to_string(), value.to_vec());
        debug!(key, bytes = value.len(), "conditional put");
        Ok(true)
    }

    fn scan_range(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>> {
        let map = self.state.read().map_err(|_| StoreError::Poisoned)?;
        let snapshot: Vec<StoreResult<StateEntry>> = match key_range(start, end) {
            Some(bounds) => map
                .range::<str, _>(bounds)
                .map(|(k, v)| Ok(StateEntry::new(k.as_str(), v.as_slice())))
                .collect(),
            None => Vec::new(),
        };
        debug!(start, end, entries = snapshot.len(), "open range cursor");
        Ok(StateIterator::new(
            snapshot.into_iter(),
            CursorLease::acquire(&self.open_cursors),
        ))
    }
}

impl std::fmt::Debug for InMemoryStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryStateStore")
            .field("key_count", &count)
            .field("open_cursors", &self.open_cursors())
            .finish()
    }
}
