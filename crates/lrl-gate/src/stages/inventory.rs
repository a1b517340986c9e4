use lrl_types::{LandRegister, ReservationNoteRequest};

use crate::compare::inventory_difference;
use crate::error::GateError;
use crate::stage::{GateContext, GateStage, StageDecision};

/// Exact match of all six inventory register fields.
pub struct InventoryStage;

impl GateStage for InventoryStage {
    fn name(&self) -> &str {
        "inventory"
    }

    fn evaluate(
        &self,
        stored: &LandRegister,
        request: &ReservationNoteRequest,
        _context: &GateContext,
    ) -> Result<StageDecision, GateError> {
        match inventory_difference(&stored.inventory_register, &request.inventory_register) {
            Some(field) => Ok(StageDecision::mismatch(format!(
                "inventory field '{field}' differs"
            ))),
            None => Ok(StageDecision::Pass),
        }
    }
}
