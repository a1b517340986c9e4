use lrl_codec::CodecError;
use lrl_gate::GateError;
use lrl_store::StoreError;
use lrl_types::TypeError;

/// Errors produced by contract operations.
///
/// Every variant reaches the caller as an error response carrying its
/// display text; none is retried inside the contract.
#[derive(Debug, thiserror::Error)]
pub enum ChaincodeError {
    #[error("Incorrect number of arguments: got {given}. Expecting {expected}")]
    Arity { expected: &'static str, given: usize },

    #[error("Failed to unmarshal: {0}")]
    Decode(String),

    #[error("Failed to marshal: {0}")]
    Encode(String),

    #[error("Landregister does not exist: {0}")]
    NotFound(String),

    #[error("Reservation Note already exists for {0}!")]
    AlreadyReserved(String),

    #[error("Landregister and Reservation note request unequal: {reason}")]
    ValidationMismatch { key: String, reason: String },

    #[error("Landregister {0} changed while the request was processed; retry")]
    Conflict(String),

    #[error("invalid land register key: {0}")]
    InvalidKey(#[from] TypeError),

    #[error("Failed to access state: {0}")]
    Store(#[from] StoreError),

    #[error("gate error: {0}")]
    Gate(#[from] GateError),

    #[error("Received unknown function invocation: {0}")]
    UnknownOperation(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ChaincodeError {
    /// Short machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Arity { .. } => "arity",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
            Self::NotFound(_) => "not-found",
            Self::AlreadyReserved(_) => "already-reserved",
            Self::ValidationMismatch { .. } => "validation-mismatch",
            Self::Conflict(_) => "conflict",
            Self::InvalidKey(_) => "invalid-key",
            Self::Store(_) => "store",
            Self::Gate(_) => "gate",
            Self::UnknownOperation(_) => "unknown-operation",
            Self::Config(_) => "config",
        }
    }

    /// `true` when resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<CodecError> for ChaincodeError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Decode(msg) => Self::Decode(msg),
            CodecError::Encode(msg) => Self::Encode(msg),
            CodecError::Store(e) => Self::Store(e),
            CodecError::Io(e) => Self::Store(StoreError::Io(e)),
        }
    }
}

pub type ChaincodeResult<T> = Result<T, ChaincodeError>;
