//! # Module Deployments
//!
//! The code table: address → deployed module object. Deploying assigns a
//! fresh deterministic address; nothing is ever undeployed, so the router
//! can rely on a routed address staying resolvable.

use crate::domain::RouterError;
use crate::ports::Facet;
use parking_lot::RwLock;
use shared_crypto::keccak256_many;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Deployed modules by address.
#[derive(Default)]
pub struct FacetDeployments {
    modules: RwLock<HashMap<Address, Arc<dyn Facet>>>,
    nonce: AtomicU64,
}

impl FacetDeployments {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh address without deploying anything at it.
    ///
    /// Address = last 20 bytes of `keccak256("gamereg.deploy" ‖ nonce)`.
    pub fn allocate_address(&self) -> Address {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let hash = keccak256_many(&[b"gamereg.deploy", &nonce.to_be_bytes()]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash.0[12..]);
        Address(address)
    }

    /// Deploy `module` at a fresh address.
    pub fn deploy(&self, module: Arc<dyn Facet>) -> Address {
        loop {
            let address = self.allocate_address();
            let mut modules = self.modules.write();
            if modules.contains_key(&address) {
                continue;
            }
            debug!(module = module.name(), address = %address, "Module deployed");
            modules.insert(address, module);
            return address;
        }
    }

    /// Deploy `module` at a chosen address.
    pub fn deploy_at(&self, address: Address, module: Arc<dyn Facet>) -> Result<(), RouterError> {
        if address.is_zero() {
            return Err(RouterError::ZeroAddress);
        }
        let mut modules = self.modules.write();
        if modules.contains_key(&address) {
            return Err(RouterError::AddressInUse(address));
        }
        debug!(module = module.name(), address = %address, "Module deployed");
        modules.insert(address, module);
        Ok(())
    }

    /// Module at `address`.
    #[must_use]
    pub fn get(&self, address: &Address) -> Option<Arc<dyn Facet>> {
        self.modules.read().get(address).cloned()
    }

    /// True if a module lives at `address`.
    #[must_use]
    pub fn is_deployed(&self, address: &Address) -> bool {
        self.modules.read().contains_key(address)
    }

    /// Number of deployed modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    /// True when nothing is deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}
