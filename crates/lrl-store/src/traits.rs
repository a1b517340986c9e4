use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::StoreResult;

/// A single `(key, value)` pair produced by a range scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl StateEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered key-value world state.
///
/// All implementations must satisfy these invariants:
/// - Keys are ordered lexicographically by their UTF-8 bytes.
/// - `get_state` returns `Ok(None)` for a missing key; `Err` is reserved for
///   backend failure.
/// - `put_state` is an unconditional upsert with no concurrency check.
/// - `put_state_if` compares and writes atomically with respect to every
///   other write on the same store.
/// - All I/O errors are propagated, never silently ignored.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Write `value` under `key` only if the current value equals `expected`
    /// (`None` meaning the key is absent). Returns `false` without writing
    /// when the comparison fails.
    fn put_state_if(&self, key: &str, expected: Option<&[u8]>, value: &[u8])
        -> StoreResult<bool>;

    /// Open a cursor over keys in `[start, end)`. An empty `start` or `end`
    /// leaves that side unbounded.
    ///
    /// The bundled backends return a snapshot cursor: raw entries in the
    /// range are copied when the cursor opens, and later writes are not
    /// visible through it. Values are never decoded here.
    fn scan_range(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>>;

    /// Open a cursor over the full key space.
    fn scan_all(&self) -> StoreResult<StateIterator<'_>> {
        self.scan_range("", "")
    }
}

/// Translate a `[start, end)` scan request into map bounds.
///
/// Returns `None` when the range is empty (`start > end`, both bounded).
pub fn key_range<'k>(start: &'k str, end: &'k str) -> Option<(Bound<&'k str>, Bound<&'k str>)> {
    if !start.is_empty() && !end.is_empty() && start >= end {
        return None;
    }
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    Some((lower, upper))
}

/// Registration of one open cursor against a backend.
///
/// Increments the backend's open-cursor count on creation and decrements it
/// exactly once when dropped.
#[derive(Debug)]
pub struct CursorLease {
    open: Arc<AtomicUsize>,
}

impl CursorLease {
    pub fn acquire(open: &Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            open: Arc::clone(open),
        }
    }
}

impl Drop for CursorLease {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Single-pass cursor over a range of world state.
///
/// The cursor is released as soon as it is exhausted or yields an error, and
/// in any case when the iterator is dropped. After release `next` returns
/// `None`.
pub struct StateIterator<'a> {
    entries: Box<dyn Iterator<Item = StoreResult<StateEntry>> + Send + 'a>,
    lease: Option<CursorLease>,
}

impl<'a> StateIterator<'a> {
    pub fn new<I>(entries: I, lease: CursorLease) -> Self
    where
        I: Iterator<Item = StoreResult<StateEntry>> + Send + 'a,
    {
        Self {
            entries: Box::new(entries),
            lease: Some(lease),
        }
    }

    /// Release the cursor early. Further calls to `next` return `None`.
    pub fn close(&mut self) {
        self.lease.take();
    }

    pub fn is_open(&self) -> bool {
        self.lease.is_some()
    }
}

impl Iterator for StateIterator<'_> {
    type Item = StoreResult<StateEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lease.as_ref()?;
        match self.entries.next() {
            Some(Ok(entry)) => Some(Ok(entry)),
            Some(Err(e)) => {
                self.close();
                Some(Err(e))
            }
            None => {
                self.close();
                None
            }
        }
    }
}

impl std::fmt::Debug for StateIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateIterator")
            .field("open", &self.is_open())
            .finish()
    }
}
