//! Asset ledger kept in the `gamereg.asset.storage` region.

use crate::domain::{AssetError, AssetLayout};
use crate::ports::AssetLedger;
use gr_01_namespaced_storage::SlotStore;
use gr_02_module_router::CallContext;
use registry_telemetry::log_event;
use shared_types::{Address, Observation};

const COMPONENT: &str = "asset";

/// Holder-initiated ledger without approvals.
#[derive(Debug, Default, Clone, Copy)]
pub struct NamespacedAssetLedger;

impl NamespacedAssetLedger {
    /// Create the ledger.
    pub fn new() -> Self {
        Self
    }

    fn credit(store: &mut dyn SlotStore, holder: &Address) -> Result<(), AssetError> {
        let balances = AssetLayout::balances();
        let current = balances.get(&*store, holder)?.unwrap_or(0);
        balances.insert(store, holder, &current.saturating_add(1))?;
        Ok(())
    }

    fn debit(store: &mut dyn SlotStore, holder: &Address) -> Result<(), AssetError> {
        let balances = AssetLayout::balances();
        match balances.get(&*store, holder)?.unwrap_or(0) {
            0 | 1 => balances.remove(store, holder)?,
            current => balances.insert(store, holder, &(current - 1))?,
        }
        Ok(())
    }
}

impl AssetLedger for NamespacedAssetLedger {
    fn check_mint(&self, store: &dyn SlotStore, to: &Address, id: u64) -> Result<(), AssetError> {
        if to.is_zero() {
            return Err(AssetError::InvalidRecipient(*to));
        }
        if AssetLayout::holders().contains(store, &id)? {
            return Err(AssetError::AlreadyMinted(id));
        }
        Ok(())
    }

    fn mint(&self, ctx: &mut CallContext<'_>, to: Address, id: u64) -> Result<(), AssetError> {
        self.check_mint(ctx.store(), &to, id)?;
        AssetLayout::holders().insert(ctx.store_mut(), &id, &to)?;
        Self::credit(ctx.store_mut(), &to)?;
        ctx.emit(Observation::AssetTransferred {
            from: Address::ZERO,
            to,
            id,
        });
        log_event!(debug, COMPONENT, "Asset minted", id, to = %to);
        Ok(())
    }

    fn owner_of(&self, store: &dyn SlotStore, id: u64) -> Result<Option<Address>, AssetError> {
        Ok(AssetLayout::holders().get(store, &id)?)
    }

    fn balance_of(&self, store: &dyn SlotStore, holder: &Address) -> Result<u64, AssetError> {
        Ok(AssetLayout::balances().get(store, holder)?.unwrap_or(0))
    }

    fn transfer(
        &self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        id: u64,
    ) -> Result<(), AssetError> {
        let holder = self
            .owner_of(ctx.store(), id)?
            .ok_or(AssetError::NonexistentAsset(id))?;
        let caller = ctx.caller();
        if holder != from || caller != from {
            return Err(AssetError::NotHolder { caller, id });
        }
        if to.is_zero() {
            return Err(AssetError::InvalidRecipient(to));
        }

        AssetLayout::holders().insert(ctx.store_mut(), &id, &to)?;
        Self::debit(ctx.store_mut(), &from)?;
        Self::credit(ctx.store_mut(), &to)?;
        ctx.emit(Observation::AssetTransferred { from, to, id });
        log_event!(info, COMPONENT, "Asset transferred", id, from = %from, to = %to);
        Ok(())
    }
}
