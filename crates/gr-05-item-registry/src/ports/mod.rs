//! # Ports
//!
//! - [`AssetLedger`]: the transferable asset backing every entry

use crate::domain::AssetError;
use gr_01_namespaced_storage::SlotStore;
use gr_02_module_router::CallContext;
use shared_types::Address;

/// Ownership ledger of the asset minted for each entry.
///
/// The registry never caches holders; consent checks ask [`owner_of`]
/// at call time.
///
/// [`owner_of`]: AssetLedger::owner_of
pub trait AssetLedger: Send + Sync {
    /// Fail if `to` cannot receive asset `id`. Runs before consent so a
    /// rejected mint never burns a signature.
    fn check_mint(&self, store: &dyn SlotStore, to: &Address, id: u64) -> Result<(), AssetError>;

    /// Mint asset `id` to `to`.
    fn mint(&self, ctx: &mut CallContext<'_>, to: Address, id: u64) -> Result<(), AssetError>;

    /// Current holder of `id`.
    fn owner_of(&self, store: &dyn SlotStore, id: u64) -> Result<Option<Address>, AssetError>;

    /// Number of assets held by `holder`.
    fn balance_of(&self, store: &dyn SlotStore, holder: &Address) -> Result<u64, AssetError>;

    /// Move `id` from `from` to `to`. The caller must be `from`.
    fn transfer(
        &self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        id: u64,
    ) -> Result<(), AssetError>;
}
