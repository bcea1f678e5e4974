//! # Router-Owned Functions
//!
//! Selectors the router answers itself. None of them can ever be routed to a
//! module, so the upgrade path and introspection cannot be cut away.

use shared_crypto::{interface_id, selector};
use shared_types::Selector;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A function implemented by the router itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterCall {
    /// `applyModuleCuts((address,uint8,bytes4[])[],address,bytes)`
    ApplyModuleCuts,
    /// `facets()`
    Facets,
    /// `facetFunctionSelectors(address)`
    FacetFunctionSelectors,
    /// `facetAddresses()`
    FacetAddresses,
    /// `facetAddress(bytes4)`
    FacetAddress,
    /// `supportsInterface(bytes4)`
    SupportsInterface,
    /// `admin()`
    Admin,
    /// `transferAdmin(address)`
    TransferAdmin,
    /// `setFallback(address)`
    SetFallback,
    /// `fallbackTarget()`
    FallbackTarget,
}

impl RouterCall {
    /// Every router-owned function.
    pub const ALL: [RouterCall; 10] = [
        Self::ApplyModuleCuts,
        Self::Facets,
        Self::FacetFunctionSelectors,
        Self::FacetAddresses,
        Self::FacetAddress,
        Self::SupportsInterface,
        Self::Admin,
        Self::TransferAdmin,
        Self::SetFallback,
        Self::FallbackTarget,
    ];

    /// Canonical signature.
    #[must_use]
    pub const fn signature(self) -> &'static str {
        match self {
            Self::ApplyModuleCuts => "applyModuleCuts((address,uint8,bytes4[])[],address,bytes)",
            Self::Facets => "facets()",
            Self::FacetFunctionSelectors => "facetFunctionSelectors(address)",
            Self::FacetAddresses => "facetAddresses()",
            Self::FacetAddress => "facetAddress(bytes4)",
            Self::SupportsInterface => "supportsInterface(bytes4)",
            Self::Admin => "admin()",
            Self::TransferAdmin => "transferAdmin(address)",
            Self::SetFallback => "setFallback(address)",
            Self::FallbackTarget => "fallbackTarget()",
        }
    }

    /// Dispatch selector.
    #[must_use]
    pub fn selector(self) -> Selector {
        selector(self.signature())
    }

    /// Router function for `selector`, if it is router-owned.
    #[must_use]
    pub fn from_selector(selector: Selector) -> Option<Self> {
        static TABLE: OnceLock<HashMap<Selector, RouterCall>> = OnceLock::new();
        TABLE
            .get_or_init(|| Self::ALL.iter().map(|call| (call.selector(), *call)).collect())
            .get(&selector)
            .copied()
    }

    /// True if `selector` can never be routed to a module.
    #[must_use]
    pub fn is_router_owned(selector: Selector) -> bool {
        Self::from_selector(selector).is_some()
    }
}

/// ERC-165 interface id.
#[must_use]
pub fn erc165_interface() -> Selector {
    interface_id(&[RouterCall::SupportsInterface.signature()])
}

/// Introspection (loupe) interface id.
#[must_use]
pub fn loupe_interface() -> Selector {
    interface_id(&[
        RouterCall::Facets.signature(),
        RouterCall::FacetFunctionSelectors.signature(),
        RouterCall::FacetAddresses.signature(),
        RouterCall::FacetAddress.signature(),
    ])
}

/// Module-cut interface id.
#[must_use]
pub fn cut_interface() -> Selector {
    interface_id(&[RouterCall::ApplyModuleCuts.signature()])
}

/// Administrator interface id.
#[must_use]
pub fn admin_interface() -> Selector {
    interface_id(&[
        RouterCall::Admin.signature(),
        RouterCall::TransferAdmin.signature(),
    ])
}
