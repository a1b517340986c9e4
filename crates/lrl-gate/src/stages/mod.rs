//! Built-in gate stages.

pub mod inventory;
pub mod owners;
pub mod status;

pub use inventory::InventoryStage;
pub use owners::OwnerStage;
pub use status::ReservationStatusStage;
