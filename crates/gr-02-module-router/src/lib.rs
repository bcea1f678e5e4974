//! # GR-02 Module Router
//!
//! **Component:** 2
//!
//! ## Purpose
//!
//! A single logical entry point that routes each call by its 4-byte selector
//! to an independently deployed module, executing it against the router's
//! own storage and preserving the original caller. Modules are added,
//! replaced and removed after deployment through administrator-gated cuts.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | A selector maps to at most one module | `domain/cut.rs` - `apply_cuts()` |
//! | Only the administrator cuts | `service.rs` - `require_admin()` before any mutation |
//! | Router-owned selectors are never routed | `domain/calls.rs` - `RouterCall::is_router_owned()` |
//! | A failed initializer unwinds the whole batch | `service.rs` - one transaction per call |
//! | Failed calls leave no storage or observations | `service.rs` - `call()` |
//!
//! ## Router-owned functions
//!
//! | Function | Gate |
//! |----------|------|
//! | `applyModuleCuts` | administrator |
//! | `transferAdmin`, `setFallback` | administrator |
//! | `facets`, `facetFunctionSelectors`, `facetAddresses`, `facetAddress` | none |
//! | `supportsInterface`, `admin`, `fallbackTarget` | none |
//!
//! ## Usage
//!
//! ```rust,ignore
//! let deployments = Arc::new(FacetDeployments::new());
//! let module = deployments.deploy(Arc::new(MyFacet));
//! let router = ModuleRouter::new(router_address, admin, chain_id, deployments, clock)?;
//!
//! router.apply_module_cuts(admin, vec![FacetCut::add(module, MyFacet.selectors())], Address::ZERO, vec![])?;
//! let out: u64 = router.call_typed(user, selector("value()"), &())?;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FacetDeployments, ManualClock, SystemClock};
pub use codec::{decode_args, decode_output, encode_call, encode_output, split_selector};
pub use domain::{
    admin_interface, cut_interface, erc165_interface, loupe_interface, CallContext, FacetError,
    RouterCall, RouterError, RouterLayout,
};
pub use ports::{Clock, Facet};
pub use service::ModuleRouter;
