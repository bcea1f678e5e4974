//! # Storage Slots
//!
//! A slot is a 256-bit key into the router's single key/value space.
//!
//! ## Derivation rules
//!
//! | Location | Formula |
//! |----------|---------|
//! | Region base | `keccak256(uint256(keccak256(tag)) - 1) & ~0xff` |
//! | Field | `base + offset` (offset in 0..=255) |
//! | Mapping entry | `keccak256(encode(key) ‖ field_slot)` |
//! | Array element | `keccak256(field_slot) + index` |
//!
//! Clearing the low byte reserves 256 consecutive field slots per region, so
//! two regions can only overlap if their bases are equal.

use crate::domain::errors::StorageError;
use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256, keccak256_many};
use shared_types::U256;
use std::fmt;

/// A 256-bit storage key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct StorageSlot(pub U256);

impl StorageSlot {
    /// Slot from a raw 256-bit value.
    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Big-endian 32-byte form, the preimage encoding of a slot.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Field slot at `offset` from this (region base) slot.
    #[must_use]
    pub fn offset(&self, offset: u8) -> Self {
        self.plus(u64::from(offset))
    }

    /// Slot `n` positions after this one, wrapping at 2^256.
    #[must_use]
    pub fn plus(&self, n: u64) -> Self {
        Self(self.0.overflowing_add(U256::from(n)).0)
    }

    /// Slot of the entry for `key` in the mapping rooted at this slot.
    pub fn mapping_entry<K: Serialize + ?Sized>(&self, key: &K) -> Result<Self, StorageError> {
        let encoded = bincode::serialize(key).map_err(|e| StorageError::Encoding {
            reason: e.to_string(),
        })?;
        let hash = keccak256_many(&[&encoded, &self.to_be_bytes()]);
        Ok(Self(U256::from_big_endian(&hash.0)))
    }

    /// First element slot of the dynamic array whose length lives here.
    #[must_use]
    pub fn array_start(&self) -> Self {
        let hash = keccak256(&self.to_be_bytes());
        Self(U256::from_big_endian(&hash.0))
    }
}

impl fmt::Debug for StorageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:064x}", self.0)
    }
}

impl fmt::Display for StorageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Base slot of the region named `tag`.
///
/// Pure function of `tag`; every module derives its region from its own
/// unique tag and never from anything runtime-dependent.
#[must_use]
pub fn region_for(tag: &str) -> StorageSlot {
    let tag_hash = U256::from_big_endian(&keccak256(tag.as_bytes()).0);
    let preimage = StorageSlot(tag_hash.overflowing_sub(U256::one()).0).to_be_bytes();
    let base = U256::from_big_endian(&keccak256(&preimage).0);
    StorageSlot(base & !U256::from(0xffu8))
}
