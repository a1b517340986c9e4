use std::time::{Duration, Instant};

use lrl_types::{LandRegister, ReservationNoteRequest};
use tracing::debug;

use crate::config::GateConfig;
use crate::error::GateError;
use crate::stage::{GateContext, GateStage, Rejection, StageDecision, StageResult};
use crate::stages::{InventoryStage, OwnerStage, ReservationStatusStage};

// ---------------------------------------------------------------------------
// GateDecision / GateResult
// ---------------------------------------------------------------------------

/// Final decision of the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Every stage passed; the reservation note may be attached.
    Accepted,
    /// A stage failed; evaluation stopped there.
    Rejected {
        stage: String,
        rejection: Rejection,
        reason: String,
    },
}

/// The outcome of running a request through the full gate pipeline.
#[derive(Clone, Debug)]
pub struct GateResult {
    pub decision: GateDecision,
    /// Per-stage results in evaluation order.
    pub stage_results: Vec<StageResult>,
    /// Total wall-clock time for the pipeline evaluation.
    pub elapsed: Duration,
}

impl GateResult {
    /// Returns `true` if the request was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self.decision, GateDecision::Accepted)
    }

    /// The rejection kind, if the request was rejected.
    pub fn rejection(&self) -> Option<Rejection> {
        match &self.decision {
            GateDecision::Accepted => None,
            GateDecision::Rejected { rejection, .. } => Some(*rejection),
        }
    }
}

// ---------------------------------------------------------------------------
// ReservationGate
// ---------------------------------------------------------------------------

/// The reservation gate: an ordered pipeline of stages every reservation
/// request must pass before the note can be attached.
///
/// Evaluation is pure. The gate reads the stored record and the request and
/// never touches the store, so it can be rerun freely on retry.
pub struct ReservationGate {
    stages: Vec<Box<dyn GateStage>>,
    config: GateConfig,
}

impl ReservationGate {
    /// Create a gate with an empty pipeline.
    pub fn new(config: GateConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Create a gate with the default stage pipeline:
    /// ReservationStatus -> Inventory -> Owners
    pub fn with_default_stages(config: GateConfig) -> Self {
        let mut gate = Self::new(config);
        gate.add_stage(Box::new(ReservationStatusStage));
        gate.add_stage(Box::new(InventoryStage));
        gate.add_stage(Box::new(OwnerStage));
        gate
    }

    /// Append a stage to the end of the pipeline.
    pub fn add_stage(&mut self, stage: Box<dyn GateStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Evaluate a request against the stored record.
    ///
    /// The pipeline is **fail-fast**: the first failing stage stops
    /// evaluation and produces a `Rejected` decision.
    pub fn evaluate(
        &self,
        stored: &LandRegister,
        request: &ReservationNoteRequest,
    ) -> Result<GateResult, GateError> {
        let pipeline_start = Instant::now();
        let mut context = GateContext::new(self.config.owner_matching);
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let stage_start = Instant::now();
            let decision = stage.evaluate(stored, request, &context)?;

            let result = StageResult {
                stage_name: stage.name().to_string(),
                passed: decision.is_pass(),
                reason: match &decision {
                    StageDecision::Pass => None,
                    StageDecision::Fail { reason, .. } => Some(reason.clone()),
                },
                elapsed: stage_start.elapsed(),
            };
            stage_results.push(result.clone());
            context.previous_stages.push(result);

            if let StageDecision::Fail { rejection, reason } = decision {
                debug!(stage = stage.name(), %reason, "gate rejected request");
                return Ok(GateResult {
                    decision: GateDecision::Rejected {
                        stage: stage.name().to_string(),
                        rejection,
                        reason,
                    },
                    stage_results,
                    elapsed: pipeline_start.elapsed(),
                });
            }
        }

        Ok(GateResult {
            decision: GateDecision::Accepted,
            stage_results,
            elapsed: pipeline_start.elapsed(),
        })
    }
}

impl Default for ReservationGate {
    fn default() -> Self {
        Self::with_default_stages(GateConfig::default())
    }
}

impl std::fmt::Debug for ReservationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("ReservationGate")
            .field("stages", &names)
            .field("config", &self.config)
            .finish()
    }
}
