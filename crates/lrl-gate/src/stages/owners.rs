use lrl_types::{LandRegister, ReservationNoteRequest};

use crate::compare::owners_difference;
use crate::error::GateError;
use crate::stage::{GateContext, GateStage, StageDecision};

/// Owner list match, keyed by identity number, using the context's
/// [`OwnerMatching`](crate::OwnerMatching) strategy.
pub struct OwnerStage;

impl GateStage for OwnerStage {
    fn name(&self) -> &str {
        "owners"
    }

    fn evaluate(
        &self,
        stored: &LandRegister,
        request: &ReservationNoteRequest,
        context: &GateContext,
    ) -> Result<StageDecision, GateError> {
        match owners_difference(&stored.owners, &request.owners, context.owner_matching) {
            Some(reason) => Ok(StageDecision::mismatch(reason)),
            None => Ok(StageDecision::Pass),
        }
    }
}
