use lrl_types::{LandRegister, ReservationNoteRequest};

use crate::error::GateError;
use crate::stage::{GateContext, GateStage, Rejection, StageDecision};

/// Idempotence guard: a record that already carries a reservation note
/// cannot receive another one.
pub struct ReservationStatusStage;

impl GateStage for ReservationStatusStage {
    fn name(&self) -> &str {
        "reservation-status"
    }

    fn evaluate(
        &self,
        stored: &LandRegister,
        _request: &ReservationNoteRequest,
        _context: &GateContext,
    ) -> Result<StageDecision, GateError> {
        if stored.reservation_note {
            return Ok(StageDecision::Fail {
                rejection: Rejection::AlreadyReserved,
                reason: "reservation note already exists".into(),
            });
        }
        Ok(StageDecision::Pass)
    }
}
