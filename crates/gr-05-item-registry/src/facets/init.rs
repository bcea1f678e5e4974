//! # Registry Initializer
//!
//! Post-cut target of the first module cut. Never routed; the router
//! delegates into it once with `initRegistry(owner, config)`.

use crate::config::RegistryConfig;
use crate::domain::{RegistryError, RegistryLayout};
use crate::facets::{asset_interface, registry_interface};
use crate::registry::ItemRegistry;
use gr_02_module_router::{decode_args, encode_output, CallContext, Facet, FacetError, RouterLayout};
use gr_03_consent_verification::ConsentVerifier;
use gr_04_operator_registry::{operator_interface, ownership_interface, AccessControl};
use registry_telemetry::log_event;
use shared_crypto::selector;
use shared_types::{Address, Selector};

/// `initRegistry(owner, config)`
pub const INIT_REGISTRY: &str = "initRegistry(address,(string,string,uint32,uint32,uint64))";

/// One-shot initializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryInit;

impl RegistryInit {
    /// Store the owner, consent domain, limits and interface ids.
    pub fn init(
        ctx: &mut CallContext<'_>,
        owner: Address,
        config: &RegistryConfig,
    ) -> Result<(), RegistryError> {
        if RegistryLayout::is_initialized(ctx.store())? {
            return Err(RegistryError::AlreadyInitialized);
        }
        config.validate()?;

        AccessControl::initialize_owner(ctx, owner)?;
        ConsentVerifier::initialize(ctx, &config.domain_name, &config.domain_version)?;
        ItemRegistry::initialize(ctx, config.limits())?;

        for interface in [
            registry_interface(),
            asset_interface(),
            ownership_interface(),
            operator_interface(),
        ] {
            RouterLayout::set_interface(ctx.store_mut(), interface, true)?;
        }

        log_event!(info, "registry", "Registry deployment initialized", owner = %owner, chain_id = ctx.chain().chain_id);
        Ok(())
    }
}

impl Facet for RegistryInit {
    fn name(&self) -> &'static str {
        "registry-init"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![selector(INIT_REGISTRY)]
    }

    fn execute(
        &self,
        ctx: &mut CallContext<'_>,
        sel: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, FacetError> {
        if sel != selector(INIT_REGISTRY) {
            return Err(FacetError::UnhandledSelector(sel));
        }
        let (owner, config): (Address, RegistryConfig) = decode_args(args)?;
        Self::init(ctx, owner, &config)?;
        encode_output(&())
    }
}
