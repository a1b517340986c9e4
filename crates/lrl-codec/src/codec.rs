use serde::de::DeserializeOwned;
use serde::Serialize;

use lrl_types::{LandRegister, ReservationNoteRequest};

use crate::error::{CodecError, CodecResult};

/// Canonical JSON codec for ledger documents.
///
/// Encoding emits fields in declaration order with no insignificant
/// whitespace. Decoding is structural: missing required fields and
/// malformed JSON are errors, unknown fields are ignored.
pub struct RecordCodec;

impl RecordCodec {
    /// Encode a document to canonical JSON bytes.
    pub fn encode<T: Serialize>(value: &T) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Decode any document shape from JSON bytes.
    pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    pub fn decode_land_register(bytes: &[u8]) -> CodecResult<LandRegister> {
        Self::decode(bytes)
    }

    pub fn decode_request(bytes: &[u8]) -> CodecResult<ReservationNoteRequest> {
        Self::decode(bytes)
    }
}
