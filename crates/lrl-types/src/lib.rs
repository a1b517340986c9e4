//! Foundation types for the Land Register Ledger (LRL).
//!
//! This crate defines the document schema persisted in the ledger and the
//! deterministic composite-key scheme under which each document is stored.
//! Every other LRL crate depends on `lrl-types`.
//!
//! # Key Types
//!
//! - [`LandRegister`] -- Root document: title page, inventory, owners, reservation flag
//! - [`ReservationNoteRequest`] -- Caller-supplied claim authorizing a reservation note
//! - [`Owner`] -- Owner sub-record, keyed by identity number
//! - [`RecordKey`] -- Composite key `docType-districtCourt-registryDistrict-sheetNumber`
//! - [`KeyPolicy`] -- How separator-bearing key components are treated

pub mod error;
pub mod fixture;
pub mod key;
pub mod record;

pub use error::TypeError;
pub use fixture::sample_land_registers;
pub use key::{KeyPolicy, RecordKey, KEY_SEPARATOR};
pub use record::{
    InventoryRegister, LandRegister, Owner, ReservationNoteRequest, TitlePage,
    LAND_REGISTER_OBJECT_TYPE,
};
