//! # Typed Storage Handles
//!
//! Zero-sized views that give a slot (or a family of derived slots) a Rust
//! type. Values are `bincode`-encoded; an absent slot decodes to `None`.
//!
//! | Handle | Slots used |
//! |--------|-----------|
//! | `Field<T>` | `slot` |
//! | `Mapping<K, V>` | `keccak(encode(k) ‖ slot)` per key |
//! | `SlotVec<T>` | length at `slot`, elements from `keccak(slot)` |
//! | `EnumerableSet<T>` | values vector at `slot`, positions mapping at `slot + 1` |

use crate::domain::{StorageError, StorageSlot};
use crate::ports::SlotStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StorageError> {
    bincode::serialize(value).map_err(|e| StorageError::Encoding {
        reason: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(slot: &StorageSlot, bytes: &[u8]) -> Result<T, StorageError> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Decoding {
        slot: *slot,
        reason: e.to_string(),
    })
}

// =============================================================================
// FIELD
// =============================================================================

/// A single typed value at a fixed slot.
pub struct Field<T> {
    slot: StorageSlot,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T: Serialize + DeserializeOwned> Field<T> {
    /// Handle over `slot`.
    #[must_use]
    pub const fn at(slot: StorageSlot) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// Underlying slot.
    #[must_use]
    pub fn slot(&self) -> StorageSlot {
        self.slot
    }

    /// Current value, `None` if never written or cleared.
    pub fn get<S: SlotStore + ?Sized>(&self, store: &S) -> Result<Option<T>, StorageError> {
        store
            .read(&self.slot)
            .map(|bytes| decode(&self.slot, &bytes))
            .transpose()
    }

    /// Current value or `T::default()`.
    pub fn get_or_default<S: SlotStore + ?Sized>(&self, store: &S) -> Result<T, StorageError>
    where
        T: Default,
    {
        Ok(self.get(store)?.unwrap_or_default())
    }

    /// Overwrite the value.
    pub fn set<S: SlotStore + ?Sized>(&self, store: &mut S, value: &T) -> Result<(), StorageError> {
        store.write(self.slot, encode(value)?);
        Ok(())
    }

    /// Reset to absent.
    pub fn clear<S: SlotStore + ?Sized>(&self, store: &mut S) {
        store.clear(&self.slot);
    }
}

// =============================================================================
// MAPPING
// =============================================================================

/// A key/value mapping rooted at a field slot.
///
/// Keys are not enumerable; pair with an [`EnumerableSet`] when needed.
pub struct Mapping<K, V> {
    slot: StorageSlot,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> Clone for Mapping<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Mapping<K, V> {}

impl<K: Serialize, V: Serialize + DeserializeOwned> Mapping<K, V> {
    /// Mapping rooted at `slot`.
    #[must_use]
    pub const fn at(slot: StorageSlot) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// Slot holding the entry for `key`.
    pub fn entry_slot(&self, key: &K) -> Result<StorageSlot, StorageError> {
        self.slot.mapping_entry(key)
    }

    fn entry(&self, key: &K) -> Result<Field<V>, StorageError> {
        Ok(Field::at(self.entry_slot(key)?))
    }

    /// Value for `key`, `None` if absent.
    pub fn get<S: SlotStore + ?Sized>(&self, store: &S, key: &K) -> Result<Option<V>, StorageError> {
        self.entry(key)?.get(store)
    }

    /// True if `key` has a value.
    pub fn contains<S: SlotStore + ?Sized>(&self, store: &S, key: &K) -> Result<bool, StorageError> {
        Ok(store.contains(&self.entry_slot(key)?))
    }

    /// Set the value for `key`.
    pub fn insert<S: SlotStore + ?Sized>(
        &self,
        store: &mut S,
        key: &K,
        value: &V,
    ) -> Result<(), StorageError> {
        self.entry(key)?.set(store, value)
    }

    /// Delete the value for `key`.
    pub fn remove<S: SlotStore + ?Sized>(&self, store: &mut S, key: &K) -> Result<(), StorageError> {
        store.clear(&self.entry_slot(key)?);
        Ok(())
    }
}

// =============================================================================
// DYNAMIC ARRAY
// =============================================================================

/// A growable array: length at the root slot, elements contiguous from
/// `keccak(root)`.
pub struct SlotVec<T> {
    slot: StorageSlot,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for SlotVec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SlotVec<T> {}

impl<T: Serialize + DeserializeOwned> SlotVec<T> {
    /// Array rooted at `slot`.
    #[must_use]
    pub const fn at(slot: StorageSlot) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    fn length(&self) -> Field<u64> {
        Field::at(self.slot)
    }

    fn element(&self, index: u64) -> Field<T> {
        Field::at(self.slot.array_start().plus(index))
    }

    /// Number of elements.
    pub fn len<S: SlotStore + ?Sized>(&self, store: &S) -> Result<u64, StorageError> {
        self.length().get_or_default(store)
    }

    /// True when empty.
    pub fn is_empty<S: SlotStore + ?Sized>(&self, store: &S) -> Result<bool, StorageError> {
        Ok(self.len(store)? == 0)
    }

    /// Element at `index`, `None` if out of bounds.
    pub fn get<S: SlotStore + ?Sized>(&self, store: &S, index: u64) -> Result<Option<T>, StorageError> {
        if index >= self.len(store)? {
            return Ok(None);
        }
        self.element(index).get(store)
    }

    /// Overwrite an existing element. Out-of-bounds writes are ignored and
    /// reported as `false`.
    pub fn set<S: SlotStore + ?Sized>(
        &self,
        store: &mut S,
        index: u64,
        value: &T,
    ) -> Result<bool, StorageError> {
        if index >= self.len(store)? {
            return Ok(false);
        }
        self.element(index).set(store, value)?;
        Ok(true)
    }

    /// Append an element, returning its index.
    pub fn push<S: SlotStore + ?Sized>(&self, store: &mut S, value: &T) -> Result<u64, StorageError> {
        let len = self.len(store)?;
        self.element(len).set(store, value)?;
        self.length().set(store, &(len + 1))?;
        Ok(len)
    }

    /// Remove and return the last element.
    pub fn pop<S: SlotStore + ?Sized>(&self, store: &mut S) -> Result<Option<T>, StorageError> {
        let len = self.len(store)?;
        if len == 0 {
            return Ok(None);
        }
        let last = self.element(len - 1);
        let value = last.get(store)?;
        last.clear(store);
        if len == 1 {
            self.length().clear(store);
        } else {
            self.length().set(store, &(len - 1))?;
        }
        Ok(value)
    }

    /// Remove the element at `index` by moving the last element into its
    /// place. Order is not preserved.
    pub fn swap_remove<S: SlotStore + ?Sized>(
        &self,
        store: &mut S,
        index: u64,
    ) -> Result<Option<T>, StorageError> {
        let len = self.len(store)?;
        if index >= len {
            return Ok(None);
        }
        let removed = self.element(index).get(store)?;
        let last_index = len - 1;
        if index != last_index {
            if let Some(last) = self.element(last_index).get(store)? {
                self.element(index).set(store, &last)?;
            }
        }
        self.pop(store)?;
        Ok(removed)
    }

    /// Snapshot of every element in index order.
    pub fn to_vec<S: SlotStore + ?Sized>(&self, store: &S) -> Result<Vec<T>, StorageError> {
        let len = self.len(store)?;
        let mut out = Vec::with_capacity(usize::try_from(len).unwrap_or_default());
        for index in 0..len {
            if let Some(value) = self.element(index).get(store)? {
                out.push(value);
            }
        }
        Ok(out)
    }

    /// Remove every element.
    pub fn clear<S: SlotStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        let len = self.len(store)?;
        for index in 0..len {
            self.element(index).clear(store);
        }
        self.length().clear(store);
        Ok(())
    }
}

// =============================================================================
// ENUMERABLE SET
// =============================================================================

/// Set with O(1) add, remove and membership plus ordered enumeration.
///
/// Positions are stored as `index + 1` so that zero means "absent".
/// Removal swaps the last value into the vacated index, so enumeration
/// order is not stable across removals.
pub struct EnumerableSet<T> {
    values: SlotVec<T>,
    positions: Mapping<T, u64>,
}

impl<T> Clone for EnumerableSet<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EnumerableSet<T> {}

impl<T: Serialize + DeserializeOwned> EnumerableSet<T> {
    /// Set occupying `slot` and `slot + 1`.
    #[must_use]
    pub fn at(slot: StorageSlot) -> Self {
        Self {
            values: SlotVec::at(slot),
            positions: Mapping::at(slot.plus(1)),
        }
    }

    fn position<S: SlotStore + ?Sized>(&self, store: &S, value: &T) -> Result<u64, StorageError> {
        Ok(self.positions.get(store, value)?.unwrap_or_default())
    }

    /// True if `value` is a member.
    pub fn contains<S: SlotStore + ?Sized>(&self, store: &S, value: &T) -> Result<bool, StorageError> {
        Ok(self.position(store, value)? != 0)
    }

    /// Insert `value`. Returns `false` if already present.
    pub fn add<S: SlotStore + ?Sized>(&self, store: &mut S, value: &T) -> Result<bool, StorageError> {
        if self.contains(store, value)? {
            return Ok(false);
        }
        let index = self.values.push(store, value)?;
        self.positions.insert(store, value, &(index + 1))?;
        Ok(true)
    }

    /// Remove `value`. Returns `false` if absent.
    pub fn remove<S: SlotStore + ?Sized>(&self, store: &mut S, value: &T) -> Result<bool, StorageError> {
        let position = self.position(store, value)?;
        if position == 0 {
            return Ok(false);
        }
        let index = position - 1;
        let last_index = self.values.len(store)? - 1;
        if index != last_index {
            if let Some(moved) = self.values.get(store, last_index)? {
                self.values.set(store, index, &moved)?;
                self.positions.insert(store, &moved, &position)?;
            }
        }
        self.values.pop(store)?;
        self.positions.remove(store, value)?;
        Ok(true)
    }

    /// Number of members.
    pub fn len<S: SlotStore + ?Sized>(&self, store: &S) -> Result<u64, StorageError> {
        self.values.len(store)
    }

    /// True when empty.
    pub fn is_empty<S: SlotStore + ?Sized>(&self, store: &S) -> Result<bool, StorageError> {
        self.values.is_empty(store)
    }

    /// Snapshot of the members.
    pub fn values<S: SlotStore + ?Sized>(&self, store: &S) -> Result<Vec<T>, StorageError> {
        self.values.to_vec(store)
    }
}
