//! Domain layer: slot derivation, regions and errors.

pub mod errors;
pub mod region;
pub mod slot;

pub use errors::StorageError;
pub use region::{Region, RegionRegistry};
pub use slot::{region_for, StorageSlot};
