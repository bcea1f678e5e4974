//! # Asset Facet
//!
//! Exposes the asset ledger so holder changes go through the router.

use crate::domain::{AssetError, RegistryLayout};
use crate::ports::AssetLedger;
use gr_02_module_router::{decode_args, encode_output, CallContext, Facet, FacetError};
use shared_crypto::{interface_id, selector};
use shared_types::{Address, Selector};
use std::sync::Arc;

/// Canonical signatures of the asset functions.
pub mod signatures {
    /// `ownerOf(uint256)`
    pub const OWNER_OF: &str = "ownerOf(uint256)";
    /// `balanceOf(address)`
    pub const BALANCE_OF: &str = "balanceOf(address)";
    /// Holder-initiated transfer.
    pub const TRANSFER: &str = "transfer(address,uint256)";
    /// `tokenURI(uint256)`
    pub const TOKEN_URI: &str = "tokenURI(uint256)";

    pub(crate) const ALL: [&str; 4] = [OWNER_OF, BALANCE_OF, TRANSFER, TOKEN_URI];
}

/// Asset interface id.
#[must_use]
pub fn asset_interface() -> Selector {
    interface_id(&signatures::ALL)
}

/// Asset ledger surface.
#[derive(Clone)]
pub struct AssetFacet {
    ledger: Arc<dyn AssetLedger>,
}

impl AssetFacet {
    /// Create the facet over `ledger`.
    pub fn new(ledger: Arc<dyn AssetLedger>) -> Self {
        Self { ledger }
    }

    fn holder(&self, ctx: &CallContext<'_>, id: u64) -> Result<Address, AssetError> {
        self.ledger
            .owner_of(ctx.store(), id)?
            .ok_or(AssetError::NonexistentAsset(id))
    }
}

impl Facet for AssetFacet {
    fn name(&self) -> &'static str {
        "asset"
    }

    fn selectors(&self) -> Vec<Selector> {
        signatures::ALL.into_iter().map(selector).collect()
    }

    fn execute(
        &self,
        ctx: &mut CallContext<'_>,
        sel: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, FacetError> {
        use signatures::*;

        if sel == selector(OWNER_OF) {
            let id: u64 = decode_args(args)?;
            encode_output(&self.holder(ctx, id)?)
        } else if sel == selector(BALANCE_OF) {
            let holder: Address = decode_args(args)?;
            encode_output(&self.ledger.balance_of(ctx.store(), &holder)?)
        } else if sel == selector(TRANSFER) {
            let (to, id): (Address, u64) = decode_args(args)?;
            let from = ctx.caller();
            self.ledger.transfer(ctx, from, to, id)?;
            encode_output(&())
        } else if sel == selector(TOKEN_URI) {
            let id: u64 = decode_args(args)?;
            self.holder(ctx, id)?;
            let uri = RegistryLayout::uri_of(ctx.store(), id)?.unwrap_or_default();
            encode_output(&uri)
        } else {
            Err(FacetError::UnhandledSelector(sel))
        }
    }
}
