//! Ordered key-value state storage for the Land Register Ledger.
//!
//! This crate is the thin adapter between the contract logic and the
//! external ledger's world state. The ledger is modelled as an ordered map
//! from string keys to opaque byte values; durability, replication and
//! transaction isolation belong to the ledger, not to this crate.
//!
//! # Storage Backends
//!
//! All backends implement the [`StateStore`] trait:
//!
//! - [`InMemoryStateStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileStateStore`] -- JSON snapshot file with atomic replace-on-write
//!
//! # Design Rules
//!
//! 1. `put_state` is an unconditional upsert.
//! 2. `put_state_if` is the only atomic read-modify-write primitive.
//! 3. Range scans are single-pass snapshots of raw entries and hold a
//!    [`CursorLease`] until exhausted, failed, or dropped.
//! 4. The store never interprets values -- it is a pure key-value store.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::FileStateStore;
pub use memory::InMemoryStateStore;
pub use traits::{CursorLease, StateEntry, StateIterator, StateStore};
