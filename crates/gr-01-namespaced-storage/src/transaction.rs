//! # Journaled Transactions
//!
//! A write overlay over a [`SlotStore`]. Reads fall through to the inner
//! store unless the slot was touched; writes and clears stay in the overlay
//! until [`Transaction::commit`]. Dropping an uncommitted transaction
//! discards every pending change.

use crate::domain::StorageSlot;
use crate::ports::SlotStore;
use std::collections::HashMap;
use tracing::trace;

/// Pending change set over an inner store.
pub struct Transaction<'a, S: SlotStore + ?Sized> {
    inner: &'a mut S,
    /// `None` marks a cleared slot.
    pending: HashMap<StorageSlot, Option<Vec<u8>>>,
}

impl<'a, S: SlotStore + ?Sized> Transaction<'a, S> {
    /// Open a transaction over `inner`.
    pub fn begin(inner: &'a mut S) -> Self {
        Self {
            inner,
            pending: HashMap::new(),
        }
    }

    /// Number of slots touched so far.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Apply every pending change to the inner store.
    pub fn commit(self) -> usize {
        let Self { inner, pending } = self;
        let count = pending.len();
        for (slot, value) in pending {
            match value {
                Some(bytes) => inner.write(slot, bytes),
                None => inner.clear(&slot),
            }
        }
        trace!(slots = count, "Transaction committed");
        count
    }

    /// Discard every pending change. Equivalent to dropping.
    pub fn rollback(self) {
        trace!(slots = self.pending.len(), "Transaction rolled back");
    }
}

impl<S: SlotStore + ?Sized> SlotStore for Transaction<'_, S> {
    fn read(&self, slot: &StorageSlot) -> Option<Vec<u8>> {
        match self.pending.get(slot) {
            Some(value) => value.clone(),
            None => self.inner.read(slot),
        }
    }

    fn write(&mut self, slot: StorageSlot, value: Vec<u8>) {
        self.pending.insert(slot, Some(value));
    }

    fn clear(&mut self, slot: &StorageSlot) {
        self.pending.insert(*slot, None);
    }
}
