//! Reservation gate for the Land Register Ledger.
//!
//! A reservation note may only be attached to a land register when the
//! caller's request matches the stored record on every identity-relevant
//! field and the record is not already reserved. The gate runs a
//! configurable pipeline of stages and produces an accept/reject decision
//! with a per-stage trail.
//!
//! # Quick Start
//!
//! ```rust
//! use lrl_gate::{GateConfig, ReservationGate};
//! use lrl_types::{sample_land_registers, ReservationNoteRequest};
//!
//! let gate = ReservationGate::with_default_stages(GateConfig::default());
//! let stored = sample_land_registers().remove(0);
//! let request = ReservationNoteRequest::from(&stored);
//! let result = gate.evaluate(&stored, &request).unwrap();
//! assert!(result.is_accepted());
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod gate;
pub mod stage;
pub mod stages;

// Re-exports for convenience.
pub use compare::{record_difference, same_record};
pub use config::{GateConfig, OwnerMatching};
pub use error::GateError;
pub use gate::{GateDecision, GateResult, ReservationGate};
pub use stage::{GateContext, GateStage, Rejection, StageDecision, StageResult};
pub use stages::{InventoryStage, OwnerStage, ReservationStatusStage};
