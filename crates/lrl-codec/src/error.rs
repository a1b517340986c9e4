use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to decode: {0}")]
    Decode(String),

    #[error("failed to encode: {0}")]
    Encode(String),

    #[error("store error: {0}")]
    Store(#[from] lrl_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;
