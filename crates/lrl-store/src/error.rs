/// Errors from state store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure of the backing format.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend failed for a reason of its own (transport, ledger).
    #[error("backend error: {0}")]
    Backend(String),

    /// A lock guarding the state was poisoned by a panicking writer.
    #[error("state lock poisoned")]
    Poisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
