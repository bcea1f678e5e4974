//! Consent region (`gamereg.consent.storage`).
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | domain name |
//! | 1 | domain version |
//! | 2 | consumed digests |

use gr_01_namespaced_storage::{Field, Mapping, Region, SlotStore, StorageError};
use shared_types::Hash;

/// Consent region marker.
pub struct ConsentLayout;

impl Region for ConsentLayout {
    const TAG: &'static str = "gamereg.consent.storage";
}

impl ConsentLayout {
    pub(crate) fn name() -> Field<String> {
        Field::at(Self::field(0))
    }

    pub(crate) fn version() -> Field<String> {
        Field::at(Self::field(1))
    }

    fn consumed() -> Mapping<Hash, bool> {
        Mapping::at(Self::field(2))
    }

    /// True if `digest` was consumed.
    pub fn is_consumed<S: SlotStore + ?Sized>(store: &S, digest: &Hash) -> Result<bool, StorageError> {
        Ok(Self::consumed().get(store, digest)?.unwrap_or(false))
    }

    /// Record `digest` as consumed. Never undone.
    pub(crate) fn consume<S: SlotStore + ?Sized>(store: &mut S, digest: &Hash) -> Result<(), StorageError> {
        Self::consumed().insert(store, digest, &true)
    }
}
