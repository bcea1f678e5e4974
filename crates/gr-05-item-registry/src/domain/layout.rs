//! Registry and asset regions.
//!
//! ## `gamereg.registry.storage`
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | next id |
//! | 1 | uuid → id |
//! | 2 | id → uuid |
//! | 3 | id → uri |
//! | 4 | limits |
//! | 5 | initialized |
//!
//! ## `gamereg.asset.storage`
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | id → holder |
//! | 1 | holder → balance |

use crate::domain::RegistryLimits;
use gr_01_namespaced_storage::{Field, Mapping, Region, SlotStore, StorageError};
use shared_types::Address;

/// Registry region marker.
pub struct RegistryLayout;

impl Region for RegistryLayout {
    const TAG: &'static str = "gamereg.registry.storage";
}

impl RegistryLayout {
    pub(crate) fn next_id() -> Field<u64> {
        Field::at(Self::field(0))
    }

    pub(crate) fn uuid_to_id() -> Mapping<String, u64> {
        Mapping::at(Self::field(1))
    }

    pub(crate) fn id_to_uuid() -> Mapping<u64, String> {
        Mapping::at(Self::field(2))
    }

    pub(crate) fn uris() -> Mapping<u64, String> {
        Mapping::at(Self::field(3))
    }

    pub(crate) fn limits() -> Field<RegistryLimits> {
        Field::at(Self::field(4))
    }

    pub(crate) fn initialized() -> Field<bool> {
        Field::at(Self::field(5))
    }

    /// True once the initializer ran.
    pub fn is_initialized<S: SlotStore + ?Sized>(store: &S) -> Result<bool, StorageError> {
        Self::initialized().get_or_default(store)
    }

    /// Id for `uuid`, 0 when absent.
    pub fn id_for<S: SlotStore + ?Sized>(store: &S, uuid: &str) -> Result<u64, StorageError> {
        Ok(Self::uuid_to_id().get(store, &uuid.to_string())?.unwrap_or(0))
    }

    /// UUID stored for `id`.
    pub fn uuid_for<S: SlotStore + ?Sized>(store: &S, id: u64) -> Result<Option<String>, StorageError> {
        Self::id_to_uuid().get(store, &id)
    }

    /// URI stored for `id`.
    pub fn uri_of<S: SlotStore + ?Sized>(store: &S, id: u64) -> Result<Option<String>, StorageError> {
        Self::uris().get(store, &id)
    }
}

/// Asset region marker.
pub struct AssetLayout;

impl Region for AssetLayout {
    const TAG: &'static str = "gamereg.asset.storage";
}

impl AssetLayout {
    pub(crate) fn holders() -> Mapping<u64, Address> {
        Mapping::at(Self::field(0))
    }

    pub(crate) fn balances() -> Mapping<Address, u64> {
        Mapping::at(Self::field(1))
    }
}
