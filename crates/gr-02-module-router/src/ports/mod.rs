//! # Ports
//!
//! - [`Facet`]: a deployed module the router delegates into
//! - [`Clock`]: block time source for the call context

use crate::domain::{CallContext, FacetError};
use shared_types::Selector;

/// A deployed module.
///
/// Modules hold no state of their own. Everything durable lives in the
/// router's storage, reached through the context, at the module's
/// namespaced region.
pub trait Facet: Send + Sync {
    /// Human-readable module name for logs.
    fn name(&self) -> &'static str;

    /// Selectors this module implements.
    fn selectors(&self) -> Vec<Selector>;

    /// Execute `selector` with bincode-encoded `args`, returning
    /// bincode-encoded output.
    fn execute(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, FacetError>;
}

/// Source of block timestamps (Unix seconds).
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> u64;
}
