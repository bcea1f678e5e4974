//! # Slot Store Adapter
//!
//! In-memory slot store. The router owns exactly one and mutates it only
//! through committed transactions.

use crate::domain::StorageSlot;
use crate::ports::SlotStore;
use std::collections::HashMap;

/// In-memory implementation of [`SlotStore`].
#[derive(Debug, Default, Clone)]
pub struct InMemorySlotStore {
    slots: HashMap<StorageSlot, Vec<u8>>,
}

impl InMemorySlotStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for InMemorySlotStore {
    fn read(&self, slot: &StorageSlot) -> Option<Vec<u8>> {
        self.slots.get(slot).cloned()
    }

    fn write(&mut self, slot: StorageSlot, value: Vec<u8>) {
        self.slots.insert(slot, value);
    }

    fn clear(&mut self, slot: &StorageSlot) {
        self.slots.remove(slot);
    }

    fn contains(&self, slot: &StorageSlot) -> bool {
        self.slots.contains_key(slot)
    }
}
