use serde_json::json;

use crate::error::ChaincodeResult;

/// Status code of a successful invocation.
pub const OK: i32 = 200;
/// Status code of a failed invocation.
pub const ERROR: i32 = 500;

/// Result of one invocation as returned to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    /// Success payload; empty on error.
    pub payload: Vec<u8>,
    /// Error payload `{"Error":"<text>"}`; empty on success.
    pub message: String,
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: OK,
            payload,
            message: String::new(),
        }
    }

    pub fn error(text: impl AsRef<str>) -> Self {
        Self {
            status: ERROR,
            payload: Vec::new(),
            message: json!({ "Error": text.as_ref() }).to_string(),
        }
    }

    pub fn from_result(result: ChaincodeResult<Vec<u8>>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::error(e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OK
    }
}
