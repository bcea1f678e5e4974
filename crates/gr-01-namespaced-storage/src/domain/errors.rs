use super::slot::StorageSlot;
use shared_types::ErrorKind;
use thiserror::Error;

/// Errors raised by slot encoding and region bookkeeping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to encode storage value: {reason}")]
    Encoding { reason: String },

    #[error("Failed to decode value at slot {slot}: {reason}")]
    Decoding { slot: StorageSlot, reason: String },

    #[error("Region tag registered twice: {0}")]
    DuplicateTag(String),

    #[error("Regions {first} and {second} share base slot {base}")]
    RegionCollision {
        first: String,
        second: String,
        base: StorageSlot,
    },
}

impl StorageError {
    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding { .. } | Self::Decoding { .. } => ErrorKind::Internal,
            Self::DuplicateTag(_) | Self::RegionCollision { .. } => ErrorKind::StateConflict,
        }
    }
}
