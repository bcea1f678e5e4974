//! # Access Control
//!
//! Owner role and operator set. The owner is a business role, separate
//! from the router's module-cut administrator; nothing here reads or writes
//! the administrator.
//!
//! Ownership moves in two steps: the owner nominates, the nominee accepts.

use crate::domain::{AccessLayout, OperatorError};
use gr_01_namespaced_storage::SlotStore;
use gr_02_module_router::CallContext;
use registry_telemetry::log_event;
use shared_types::{Address, Observation};

const COMPONENT: &str = "operators";

/// Stateless access control over the access region.
pub struct AccessControl;

impl AccessControl {
    /// Set the first owner. Runs once.
    pub fn initialize_owner(ctx: &mut CallContext<'_>, owner: Address) -> Result<(), OperatorError> {
        if owner.is_zero() {
            return Err(OperatorError::ZeroAddress);
        }
        if !Self::owner(ctx.store())?.is_zero() {
            return Err(OperatorError::AlreadyInitialized);
        }
        AccessLayout::owner().set(ctx.store_mut(), &owner)?;
        ctx.emit(Observation::OwnershipTransferred {
            previous: Address::ZERO,
            new: owner,
        });
        log_event!(info, COMPONENT, "Owner initialized", owner = %owner);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current owner (zero before initialization).
    pub fn owner<S: SlotStore + ?Sized>(store: &S) -> Result<Address, OperatorError> {
        Ok(AccessLayout::owner().get_or_default(store)?)
    }

    /// Nominated owner, if any.
    pub fn pending_owner<S: SlotStore + ?Sized>(store: &S) -> Result<Option<Address>, OperatorError> {
        Ok(AccessLayout::pending_owner().get(store)?)
    }

    /// True if `account` is an operator.
    pub fn is_operator<S: SlotStore + ?Sized>(store: &S, account: &Address) -> Result<bool, OperatorError> {
        Ok(AccessLayout::operators().contains(store, account)?)
    }

    /// True if `account` is the owner or an operator.
    pub fn is_owner_or_operator<S: SlotStore + ?Sized>(
        store: &S,
        account: &Address,
    ) -> Result<bool, OperatorError> {
        if account.is_zero() {
            return Ok(false);
        }
        Ok(Self::owner(store)? == *account || Self::is_operator(store, account)?)
    }

    /// Snapshot of the operator set. Order changes on removal.
    pub fn operators<S: SlotStore + ?Sized>(store: &S) -> Result<Vec<Address>, OperatorError> {
        Ok(AccessLayout::operators().values(store)?)
    }

    /// Fail unless the caller is the owner.
    pub fn require_owner(ctx: &CallContext<'_>) -> Result<Address, OperatorError> {
        let owner = Self::owner(ctx.store())?;
        if owner.is_zero() || ctx.caller() != owner {
            return Err(OperatorError::NotOwner {
                caller: ctx.caller(),
            });
        }
        Ok(owner)
    }

    // -------------------------------------------------------------------------
    // Operator set
    // -------------------------------------------------------------------------

    /// Grant standing authorization to `operator`. Owner only.
    pub fn add_operator(ctx: &mut CallContext<'_>, operator: Address) -> Result<(), OperatorError> {
        Self::require_owner(ctx)?;
        if operator.is_zero() {
            return Err(OperatorError::ZeroAddress);
        }
        if !AccessLayout::operators().add(ctx.store_mut(), &operator)? {
            return Err(OperatorError::OperatorAlreadyExists(operator));
        }
        ctx.emit(Observation::OperatorAdded { operator });
        log_event!(info, COMPONENT, "Operator added", operator = %operator);
        Ok(())
    }

    /// Revoke `operator`. Owner only.
    pub fn remove_operator(ctx: &mut CallContext<'_>, operator: Address) -> Result<(), OperatorError> {
        Self::require_owner(ctx)?;
        if !AccessLayout::operators().remove(ctx.store_mut(), &operator)? {
            return Err(OperatorError::OperatorNotFound(operator));
        }
        ctx.emit(Observation::OperatorRemoved { operator });
        log_event!(info, COMPONENT, "Operator removed", operator = %operator);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Ownership transfer
    // -------------------------------------------------------------------------

    /// Nominate `new_owner`. Owner only; replaces any earlier nomination.
    pub fn transfer_ownership(ctx: &mut CallContext<'_>, new_owner: Address) -> Result<(), OperatorError> {
        let owner = Self::require_owner(ctx)?;
        if new_owner.is_zero() {
            return Err(OperatorError::ZeroAddress);
        }
        AccessLayout::pending_owner().set(ctx.store_mut(), &new_owner)?;
        ctx.emit(Observation::OwnershipTransferStarted {
            previous: owner,
            new: new_owner,
        });
        log_event!(info, COMPONENT, "Ownership transfer started", owner = %owner, pending = %new_owner);
        Ok(())
    }

    /// Complete a transfer. Pending owner only.
    pub fn accept_ownership(ctx: &mut CallContext<'_>) -> Result<(), OperatorError> {
        let caller = ctx.caller();
        match Self::pending_owner(ctx.store())? {
            Some(pending) if pending == caller => {}
            _ => return Err(OperatorError::NotPendingOwner { caller }),
        }
        let previous = Self::owner(ctx.store())?;
        AccessLayout::owner().set(ctx.store_mut(), &caller)?;
        AccessLayout::pending_owner().clear(ctx.store_mut());
        ctx.emit(Observation::OwnershipTransferred {
            previous,
            new: caller,
        });
        log_event!(info, COMPONENT, "Ownership transferred", previous = %previous, owner = %caller);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_01_namespaced_storage::InMemorySlotStore;
    use shared_types::ChainContext;

    const OWNER: Address = Address::repeat_byte(0x0A);
    const ALICE: Address = Address::repeat_byte(0xA1);
    const BOB: Address = Address::repeat_byte(0xB0);

    struct Harness {
        store: InMemorySlotStore,
        observations: Vec<Observation>,
    }

    impl Harness {
        fn new() -> Self {
            let mut h = Self {
                store: InMemorySlotStore::new(),
                observations: Vec::new(),
            };
            h.as_caller(OWNER, |ctx| AccessControl::initialize_owner(ctx, OWNER))
                .unwrap();
            h
        }

        fn as_caller<T>(
            &mut self,
            caller: Address,
            f: impl FnOnce(&mut CallContext<'_>) -> Result<T, OperatorError>,
        ) -> Result<T, OperatorError> {
            let mut ctx = CallContext::new(
                caller,
                Address::repeat_byte(0x01),
                ChainContext::default(),
                &mut self.store,
                &mut self.observations,
            );
            f(&mut ctx)
        }
    }

    #[test]
    fn test_add_and_remove_operator() {
        let mut h = Harness::new();
        h.as_caller(OWNER, |ctx| AccessControl::add_operator(ctx, ALICE))
            .unwrap();
        assert!(AccessControl::is_operator(&h.store, &ALICE).unwrap());
        assert!(AccessControl::is_owner_or_operator(&h.store, &ALICE).unwrap());
        assert!(AccessControl::is_owner_or_operator(&h.store, &OWNER).unwrap());
        assert_eq!(AccessControl::operators(&h.store).unwrap(), vec![ALICE]);

        h.as_caller(OWNER, |ctx| AccessControl::remove_operator(ctx, ALICE))
            .unwrap();
        assert!(!AccessControl::is_operator(&h.store, &ALICE).unwrap());
        assert!(matches!(
            h.observations.last(),
            Some(Observation::OperatorRemoved { operator }) if *operator == ALICE
        ));
    }

    #[test]
    fn test_operator_rules() {
        let mut h = Harness::new();
        assert_eq!(
            h.as_caller(OWNER, |ctx| AccessControl::add_operator(ctx, Address::ZERO)),
            Err(OperatorError::ZeroAddress)
        );
        h.as_caller(OWNER, |ctx| AccessControl::add_operator(ctx, ALICE))
            .unwrap();
        assert_eq!(
            h.as_caller(OWNER, |ctx| AccessControl::add_operator(ctx, ALICE)),
            Err(OperatorError::OperatorAlreadyExists(ALICE))
        );
        assert_eq!(
            h.as_caller(OWNER, |ctx| AccessControl::remove_operator(ctx, BOB)),
            Err(OperatorError::OperatorNotFound(BOB))
        );
    }

    #[test]
    fn test_operators_cannot_manage_operators() {
        let mut h = Harness::new();
        h.as_caller(OWNER, |ctx| AccessControl::add_operator(ctx, ALICE))
            .unwrap();
        assert_eq!(
            h.as_caller(ALICE, |ctx| AccessControl::add_operator(ctx, BOB)),
            Err(OperatorError::NotOwner { caller: ALICE })
        );
        assert_eq!(
            h.as_caller(ALICE, |ctx| AccessControl::remove_operator(ctx, ALICE)),
            Err(OperatorError::NotOwner { caller: ALICE })
        );
    }

    #[test]
    fn test_two_step_ownership() {
        let mut h = Harness::new();
        h.as_caller(OWNER, |ctx| AccessControl::transfer_ownership(ctx, BOB))
            .unwrap();
        assert_eq!(AccessControl::owner(&h.store).unwrap(), OWNER);
        assert_eq!(AccessControl::pending_owner(&h.store).unwrap(), Some(BOB));

        assert_eq!(
            h.as_caller(ALICE, |ctx| AccessControl::accept_ownership(ctx)),
            Err(OperatorError::NotPendingOwner { caller: ALICE })
        );

        h.as_caller(BOB, |ctx| AccessControl::accept_ownership(ctx))
            .unwrap();
        assert_eq!(AccessControl::owner(&h.store).unwrap(), BOB);
        assert_eq!(AccessControl::pending_owner(&h.store).unwrap(), None);
        assert_eq!(
            h.as_caller(OWNER, |ctx| AccessControl::add_operator(ctx, ALICE)),
            Err(OperatorError::NotOwner { caller: OWNER })
        );
    }

    #[test]
    fn test_initialize_once() {
        let mut h = Harness::new();
        assert_eq!(
            h.as_caller(BOB, |ctx| AccessControl::initialize_owner(ctx, BOB)),
            Err(OperatorError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_zero_is_never_authorized() {
        let h = Harness::new();
        assert!(!AccessControl::is_owner_or_operator(&h.store, &Address::ZERO).unwrap());
    }
}
