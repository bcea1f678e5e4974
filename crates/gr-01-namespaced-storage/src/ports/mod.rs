//! Ports: the key/value store every region is laid over.

use crate::domain::StorageSlot;

/// Slot-addressed persistent store.
///
/// An absent slot reads as `None`; facets treat that as the zero value of
/// whatever type lives there.
pub trait SlotStore: Send {
    /// Read the raw bytes at `slot`.
    fn read(&self, slot: &StorageSlot) -> Option<Vec<u8>>;

    /// Overwrite `slot`.
    fn write(&mut self, slot: StorageSlot, value: Vec<u8>);

    /// Reset `slot` to absent.
    fn clear(&mut self, slot: &StorageSlot);

    /// True if `slot` holds a value.
    fn contains(&self, slot: &StorageSlot) -> bool {
        self.read(slot).is_some()
    }
}
