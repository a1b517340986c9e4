use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::traits::{key_range, CursorLease, StateEntry, StateIterator, StateStore};

/// State store persisted as a single JSON object file.
///
/// On-disk format is a JSON object mapping each key to its value as a
/// string, so only UTF-8 values can be stored. Every write serializes the
/// full map to a temporary file in the same directory and renames it over
/// the previous snapshot; a failed write leaves both the file and the
/// in-memory view unchanged.
pub struct FileStateStore {
    path: PathBuf,
    state: RwLock<BTreeMap<String, String>>,
    open_cursors: Arc<AtomicUsize>,
}

impl FileStateStore {
    /// Open the store at `path`, loading an existing snapshot if present.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let state = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?
            }
        } else {
            BTreeMap::new()
        };

        info!(path = %path.display(), keys = state.len(), "opened state file");
        Ok(Self {
            path,
            state: RwLock::new(state),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Path of the backing snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of range cursors that have not yet been released.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn persist(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, map)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %self.path.display(), keys = map.len(), "persisted state file");
        Ok(())
    }

    fn utf8(key: &str, value: &[u8]) -> StoreResult<String> {
        String::from_utf8(value.to_vec()).map_err(|_| {
            StoreError::Serialization(format!("value for key {key} is not valid UTF-8"))
        })
    }
}

impl StateStore for FileStateStore {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).map(|v| v.as_bytes().to_vec()))
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let value = Self::utf8(key, value)?;
        let mut map = self.state.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = map.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *map = next;
        Ok(())
    }

    fn put_state_if(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StoreResult<bool> {
        let value = Self::utf8(key, value)?;
        let mut map = self.state.write().map_err(|_| StoreError::Poisoned)?;
        if map.get(key).map(String::as_bytes) != expected {
            debug!(key, "conditional put rejected: value changed");
            return Ok(false);
        }
        let mut next = map.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *map = next;
        Ok(true)
    }

    fn scan_range(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>> {
        let map = self.state.read().map_err(|_| StoreError::Poisoned)?;
        let snapshot: Vec<StoreResult<StateEntry>> = match key_range(start, end) {
            Some(bounds) => map
                .range::<str, _>(bounds)
                .map(|(k, v)| Ok(StateEntry::new(k.as_str(), v.as_bytes())))
                .collect(),
            None => Vec::new(),
        };
        Ok(StateIterator::new(
            snapshot.into_iter(),
            CursorLease::acquire(&self.open_cursors),
        ))
    }
}

impl std::fmt::Debug for FileStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStateStore")
            .field("path", &self.path)
            .field("open_cursors", &self.open_cursors())
            .finish()
    }
}
