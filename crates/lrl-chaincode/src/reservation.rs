use lrl_codec::RecordCodec;
use lrl_gate::{GateDecision, Rejection, ReservationGate};
use lrl_store::StateStore;
use lrl_types::{KeyPolicy, LandRegister, ReservationNoteRequest};
use tracing::info;

use crate::error::{ChaincodeError, ChaincodeResult};

/// Attach a reservation note to the land register addressed by `request`.
///
/// Steps: derive the key, read and decode the stored record, run the gate,
/// flip the flag, and write the re-encoded record back. The write is a
/// compare-and-swap against the bytes that were read, so a concurrent
/// change between read and write surfaces as [`ChaincodeError::Conflict`]
/// instead of a lost update. Nothing is written unless every check passed.
pub fn attach_reservation_note<S>(
    store: &S,
    gate: &ReservationGate,
    key_policy: KeyPolicy,
    request: &ReservationNoteRequest,
) -> ChaincodeResult<LandRegister>
where
    S: StateStore + ?Sized,
{
    let key = request.key(key_policy)?;
    let current = store
        .get_state(key.as_str())?
        .ok_or_else(|| ChaincodeError::NotFound(key.to_string()))?;
    let mut stored = RecordCodec::decode_land_register(&current)?;

    let result = gate.evaluate(&stored, request)?;
    match result.decision {
        GateDecision::Accepted => {}
        GateDecision::Rejected {
            rejection: Rejection::AlreadyReserved,
            ..
        } => return Err(ChaincodeError::AlreadyReserved(key.into_string())),
        GateDecision::Rejected {
            rejection: Rejection::Mismatch,
            reason,
            ..
        } => {
            return Err(ChaincodeError::ValidationMismatch {
                key: key.into_string(),
                reason,
            })
        }
    }

    stored.reservation_note = true;
    let updated = RecordCodec::encode(&stored)?;
    if !store.put_state_if(key.as_str(), Some(&current), &updated)? {
        return Err(ChaincodeError::Conflict(key.into_string()));
    }

    info!(%key, elapsed = ?result.elapsed, "reservation note attached");
    Ok(stored)
}
