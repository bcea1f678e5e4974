//! # Router Storage Layout
//!
//! The router keeps its own tables in the shared slot space, in the region
//! tagged `gamereg.router.storage`. Living in router storage means a failed
//! call rolls back selector-table changes together with everything else.
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | administrator |
//! | 1 | selector → module address |
//! | 2 | module address → ordered selectors |
//! | 3, 4 | enumerable set of module addresses |
//! | 5 | supported interface ids |
//! | 6 | fallback module |

use gr_01_namespaced_storage::{EnumerableSet, Field, Mapping, Region, SlotStore, StorageError};
use shared_types::{Address, Selector};

/// Router region marker.
pub struct RouterLayout;

impl Region for RouterLayout {
    const TAG: &'static str = "gamereg.router.storage";
}

impl RouterLayout {
    fn admin_field() -> Field<Address> {
        Field::at(Self::field(0))
    }

    fn selector_targets() -> Mapping<Selector, Address> {
        Mapping::at(Self::field(1))
    }

    fn target_selectors() -> Mapping<Address, Vec<Selector>> {
        Mapping::at(Self::field(2))
    }

    fn targets() -> EnumerableSet<Address> {
        EnumerableSet::at(Self::field(3))
    }

    fn interfaces() -> Mapping<Selector, bool> {
        Mapping::at(Self::field(5))
    }

    fn fallback_field() -> Field<Address> {
        Field::at(Self::field(6))
    }

    // -------------------------------------------------------------------------
    // Administrator
    // -------------------------------------------------------------------------

    /// Current administrator (zero if never set).
    pub fn admin<S: SlotStore + ?Sized>(store: &S) -> Result<Address, StorageError> {
        Self::admin_field().get_or_default(store)
    }

    /// Overwrite the administrator.
    pub fn set_admin<S: SlotStore + ?Sized>(store: &mut S, admin: Address) -> Result<(), StorageError> {
        Self::admin_field().set(store, &admin)
    }

    // -------------------------------------------------------------------------
    // Selector table
    // -------------------------------------------------------------------------

    /// Module routed for `selector`.
    pub fn target_of<S: SlotStore + ?Sized>(
        store: &S,
        selector: Selector,
    ) -> Result<Option<Address>, StorageError> {
        Self::selector_targets().get(store, &selector)
    }

    /// Selectors routed to `target`, in the order they were added.
    pub fn selectors_of<S: SlotStore + ?Sized>(
        store: &S,
        target: Address,
    ) -> Result<Vec<Selector>, StorageError> {
        Ok(Self::target_selectors().get(store, &target)?.unwrap_or_default())
    }

    /// Every module with at least one routed selector.
    pub fn target_addresses<S: SlotStore + ?Sized>(store: &S) -> Result<Vec<Address>, StorageError> {
        Self::targets().values(store)
    }

    /// Route `selector` to `target`.
    pub fn link<S: SlotStore + ?Sized>(
        store: &mut S,
        selector: Selector,
        target: Address,
    ) -> Result<(), StorageError> {
        Self::selector_targets().insert(store, &selector, &target)?;
        let mut selectors = Self::selectors_of(store, target)?;
        selectors.push(selector);
        Self::target_selectors().insert(store, &target, &selectors)?;
        Self::targets().add(store, &target)?;
        Ok(())
    }

    /// Drop the route for `selector`, currently pointing at `target`.
    ///
    /// A module left without selectors leaves the module list.
    pub fn unlink<S: SlotStore + ?Sized>(
        store: &mut S,
        selector: Selector,
        target: Address,
    ) -> Result<(), StorageError> {
        Self::selector_targets().remove(store, &selector)?;
        let mut selectors = Self::selectors_of(store, target)?;
        selectors.retain(|s| *s != selector);
        if selectors.is_empty() {
            Self::target_selectors().remove(store, &target)?;
            Self::targets().remove(store, &target)?;
        } else {
            Self::target_selectors().insert(store, &target, &selectors)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Interfaces and fallback
    // -------------------------------------------------------------------------

    /// True if `interface_id` was registered.
    pub fn supports_interface<S: SlotStore + ?Sized>(
        store: &S,
        interface_id: Selector,
    ) -> Result<bool, StorageError> {
        Ok(Self::interfaces().get(store, &interface_id)?.unwrap_or(false))
    }

    /// Register or unregister an interface id.
    pub fn set_interface<S: SlotStore + ?Sized>(
        store: &mut S,
        interface_id: Selector,
        supported: bool,
    ) -> Result<(), StorageError> {
        if supported {
            Self::interfaces().insert(store, &interface_id, &true)
        } else {
            Self::interfaces().remove(store, &interface_id)
        }
    }

    /// Fallback module, if configured.
    pub fn fallback<S: SlotStore + ?Sized>(store: &S) -> Result<Option<Address>, StorageError> {
        Ok(Self::fallback_field()
            .get(store)?
            .filter(|address| !address.is_zero()))
    }

    /// Set the fallback module; the zero address clears it.
    pub fn set_fallback<S: SlotStore + ?Sized>(
        store: &mut S,
        target: Address,
    ) -> Result<(), StorageError> {
        if target.is_zero() {
            Self::fallback_field().clear(store);
            Ok(())
        } else {
            Self::fallback_field().set(store, &target)
        }
    }
}
