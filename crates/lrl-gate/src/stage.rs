use std::time::Duration;

use lrl_types::{LandRegister, ReservationNoteRequest};

use crate::config::OwnerMatching;
use crate::error::GateError;

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a stage refused the reservation-note transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The stored record already carries a reservation note.
    AlreadyReserved,
    /// The request does not match the stored record.
    Mismatch,
}

// ---------------------------------------------------------------------------
// StageDecision
// ---------------------------------------------------------------------------

/// The outcome of a single gate stage evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageDecision {
    /// The stage passed; proceed to the next stage.
    Pass,
    /// The stage failed; the transition must not happen.
    Fail { rejection: Rejection, reason: String },
}

impl StageDecision {
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::Fail {
            rejection: Rejection::Mismatch,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the decision is `Pass`.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` if the decision is `Fail`.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

// ---------------------------------------------------------------------------
// StageResult
// ---------------------------------------------------------------------------

/// Recorded result from a completed stage evaluation.
#[derive(Clone, Debug)]
pub struct StageResult {
    /// Name of the stage that produced this result.
    pub stage_name: String,
    /// Whether the stage passed.
    pub passed: bool,
    /// Populated on failure.
    pub reason: Option<String>,
    /// Wall-clock time the stage took to evaluate.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// GateContext
// ---------------------------------------------------------------------------

/// Contextual information available to every gate stage.
pub struct GateContext {
    /// Owner matching strategy in force.
    pub owner_matching: OwnerMatching,
    /// Results from stages that have already run in this evaluation.
    pub previous_stages: Vec<StageResult>,
}

impl GateContext {
    pub fn new(owner_matching: OwnerMatching) -> Self {
        Self {
            owner_matching,
            previous_stages: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// GateStage trait
// ---------------------------------------------------------------------------

/// A single check in the reservation gate.
///
/// Stages are evaluated in order against the stored record and the incoming
/// request. They must not have side effects, so a whole evaluation can be
/// repeated safely.
pub trait GateStage: Send + Sync {
    /// Human-readable name of this stage (e.g., "inventory", "owners").
    fn name(&self) -> &str;

    /// Evaluate the request against the stored record.
    fn evaluate(
        &self,
        stored: &LandRegister,
        request: &ReservationNoteRequest,
        context: &GateContext,
    ) -> Result<StageDecision, GateError>;
}
