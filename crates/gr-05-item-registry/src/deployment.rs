//! # Deployment and Client
//!
//! [`RegistryDeployment::deploy`] builds a complete registry:
//!
//! 1. Deploy the registry, asset, operator, consent and init facets
//! 2. Create the router with the module-cut administrator
//! 3. Apply one cut adding every facet, with `initRegistry(owner, config)`
//!    as the post-cut initializer
//!
//! The returned [`RegistryClient`] encodes every call by selector and sends
//! it through the router.

use crate::adapters::NamespacedAssetLedger;
use crate::config::RegistryConfig;
use crate::domain::{Entry, EntryRef, RegistryLimits};
use crate::facets::{asset, registry, AssetFacet, RegistryFacet, RegistryInit, INIT_REGISTRY};
use crate::ports::AssetLedger;
use crate::registry::{CreateRequest, ItemRegistry};
use anyhow::{Context, Result};
use gr_02_module_router::{
    encode_call, Clock, Facet, FacetDeployments, ModuleRouter, RouterError, SystemClock,
};
use gr_03_consent_verification::{facet as consent, ConsentFacet};
use gr_04_operator_registry::{facet as operators, OperatorFacet};
use shared_crypto::{selector, CryptoError, Eip712Domain, Secp256k1KeyPair};
use shared_types::{Address, FacetCut, Hash};
use std::sync::Arc;
use tracing::info;

/// Addresses of the deployed facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedFacets {
    /// Registry facet.
    pub registry: Address,
    /// Asset facet.
    pub asset: Address,
    /// Operator facet.
    pub operators: Address,
    /// Consent facet.
    pub consent: Address,
    /// One-shot initializer (not routed).
    pub init: Address,
}

/// Deployment wiring.
pub struct RegistryDeployment;

impl RegistryDeployment {
    /// Deploy against the system clock.
    pub fn deploy(config: RegistryConfig, admin: Address, owner: Address) -> Result<RegistryClient> {
        Self::deploy_with_clock(config, admin, owner, Arc::new(SystemClock))
    }

    /// Deploy against `clock`.
    pub fn deploy_with_clock(
        config: RegistryConfig,
        admin: Address,
        owner: Address,
        clock: Arc<dyn Clock>,
    ) -> Result<RegistryClient> {
        config.validate().context("invalid registry configuration")?;

        let deployments = Arc::new(FacetDeployments::new());
        let ledger: Arc<dyn AssetLedger> = Arc::new(NamespacedAssetLedger::new());

        let routed: [Arc<dyn Facet>; 4] = [
            Arc::new(RegistryFacet::new(ItemRegistry::new(ledger.clone()))),
            Arc::new(AssetFacet::new(ledger)),
            Arc::new(OperatorFacet),
            Arc::new(ConsentFacet),
        ];

        let mut cuts = Vec::with_capacity(routed.len());
        for module in routed {
            let name = module.name();
            let selectors = module.selectors();
            let address = deployments.deploy(module);
            info!(component = "deployment", module = name, address = %address, "Facet deployed");
            cuts.push(FacetCut::add(address, selectors));
        }
        let init = deployments.deploy(Arc::new(RegistryInit));
        let facets = DeployedFacets {
            registry: cuts[0].target,
            asset: cuts[1].target,
            operators: cuts[2].target,
            consent: cuts[3].target,
            init,
        };

        let router_address = deployments.allocate_address();
        let router = ModuleRouter::new(router_address, admin, config.chain_id, deployments, clock)
            .context("failed to create router")?;

        let init_data = encode_call(selector(INIT_REGISTRY), &(owner, &config))?;
        router
            .apply_module_cuts(admin, cuts, facets.init, init_data)
            .context("initial module cut failed")?;

        info!(
            component = "deployment",
            router = %router_address,
            admin = %admin,
            owner = %owner,
            chain_id = config.chain_id,
            "Registry deployed"
        );

        Ok(RegistryClient {
            router: Arc::new(router),
            facets,
            config,
        })
    }
}

/// Typed client over a deployed router.
#[derive(Clone)]
pub struct RegistryClient {
    router: Arc<ModuleRouter>,
    facets: DeployedFacets,
    config: RegistryConfig,
}

impl RegistryClient {
    /// The router.
    pub fn router(&self) -> &Arc<ModuleRouter> {
        &self.router
    }

    /// Deployed facet addresses.
    pub fn facets(&self) -> DeployedFacets {
        self.facets
    }

    /// Configuration the registry was deployed with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Consent domain off-system signers must use.
    pub fn domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            self.config.domain_name.clone(),
            self.config.domain_version.clone(),
            self.router.chain_id(),
            self.router.address(),
        )
    }

    fn view<A, R>(&self, signature: &str, args: &A) -> Result<R, RouterError>
    where
        A: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        self.router.call_typed(Address::ZERO, selector(signature), args)
    }

    fn send<A, R>(&self, caller: Address, signature: &str, args: &A) -> Result<R, RouterError>
    where
        A: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        self.router.call_typed(caller, selector(signature), args)
    }

    // -------------------------------------------------------------------------
    // Signer side
    // -------------------------------------------------------------------------

    /// Build a creation request for `key`'s address, signed by `key`.
    pub fn sign_create(
        &self,
        key: &Secp256k1KeyPair,
        uuid: &str,
        uri: &str,
        deadline: u64,
    ) -> Result<CreateRequest, CryptoError> {
        let beneficiary = key.address();
        let struct_hash = crate::domain::create_struct_hash(uuid, &beneficiary, uri, deadline);
        let signature = key.sign_digest(&self.domain().digest(&struct_hash))?;
        Ok(CreateRequest {
            uuid: uuid.to_string(),
            beneficiary,
            uri: uri.to_string(),
            deadline,
            signature: signature.to_vec(),
        })
    }

    /// Sign an `UpdateGameUri` consent with `key`.
    pub fn sign_update(
        &self,
        key: &Secp256k1KeyPair,
        uuid: &str,
        new_uri: &str,
        deadline: u64,
    ) -> Result<Vec<u8>, CryptoError> {
        let struct_hash = crate::domain::update_struct_hash(uuid, new_uri, deadline);
        Ok(key.sign_digest(&self.domain().digest(&struct_hash))?.to_vec())
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    /// Create an entry.
    pub fn create_game(&self, caller: Address, request: &CreateRequest) -> Result<u64, RouterError> {
        self.send(caller, registry::signatures::CREATE_GAME, request)
    }

    /// Update a URI with holder consent.
    pub fn update_uri_consented(
        &self,
        caller: Address,
        entry: impl Into<EntryRef>,
        new_uri: &str,
        deadline: u64,
        signature: &[u8],
    ) -> Result<u64, RouterError> {
        self.send(
            caller,
            registry::signatures::UPDATE_GAME_URI,
            &(entry_ref(entry), new_uri, deadline, signature),
        )
    }

    /// Update a URI on operator authority.
    pub fn update_uri_by_operator(
        &self,
        caller: Address,
        entry: impl Into<EntryRef>,
        new_uri: &str,
    ) -> Result<u64, RouterError> {
        self.send(caller, registry::signatures::SET_GAME_URI, &(entry_ref(entry), new_uri))
    }

    /// Id for `uuid`, 0 when absent.
    pub fn id_for(&self, uuid: &str) -> Result<u64, RouterError> {
        self.view(registry::signatures::ID_FOR_UUID, uuid)
    }

    /// UUID of `id`.
    pub fn uuid_for(&self, id: u64) -> Result<String, RouterError> {
        self.view(registry::signatures::UUID_FOR_ID, &id)
    }

    /// True if `entry` exists.
    pub fn exists(&self, entry: impl Into<EntryRef>) -> Result<bool, RouterError> {
        self.view(registry::signatures::EXISTS, &entry_ref(entry))
    }

    /// Number of ids ever assigned.
    pub fn total_issued(&self) -> Result<u64, RouterError> {
        self.view(registry::signatures::TOTAL_ISSUED, &())
    }

    /// Current URI of `entry`.
    pub fn uri(&self, entry: impl Into<EntryRef>) -> Result<String, RouterError> {
        self.view(registry::signatures::GAME_URI, &entry_ref(entry))
    }

    /// Full record of `entry`.
    pub fn entry(&self, entry: impl Into<EntryRef>) -> Result<Entry, RouterError> {
        self.view(registry::signatures::GET_ENTRY, &entry_ref(entry))
    }

    /// Stored limits.
    pub fn limits(&self) -> Result<RegistryLimits, RouterError> {
        self.view(registry::signatures::REGISTRY_LIMITS, &())
    }

    /// `CreateGame` struct hash computed by the registry.
    pub fn create_struct_hash(
        &self,
        uuid: &str,
        beneficiary: Address,
        uri: &str,
        deadline: u64,
    ) -> Result<Hash, RouterError> {
        self.view(
            registry::signatures::CREATE_STRUCT_HASH,
            &(uuid, beneficiary, uri, deadline),
        )
    }

    /// `UpdateGameUri` struct hash computed by the registry.
    pub fn update_struct_hash(&self, uuid: &str, new_uri: &str, deadline: u64) -> Result<Hash, RouterError> {
        self.view(registry::signatures::UPDATE_STRUCT_HASH, &(uuid, new_uri, deadline))
    }

    // -------------------------------------------------------------------------
    // Asset
    // -------------------------------------------------------------------------

    /// Current holder of `id`.
    pub fn owner_of(&self, id: u64) -> Result<Address, RouterError> {
        self.view(asset::signatures::OWNER_OF, &id)
    }

    /// Assets held by `holder`.
    pub fn balance_of(&self, holder: Address) -> Result<u64, RouterError> {
        self.view(asset::signatures::BALANCE_OF, &holder)
    }

    /// Move `id` from `caller` to `to`.
    pub fn transfer_asset(&self, caller: Address, to: Address, id: u64) -> Result<(), RouterError> {
        self.send(caller, asset::signatures::TRANSFER, &(to, id))
    }

    /// Metadata URI of asset `id`.
    pub fn token_uri(&self, id: u64) -> Result<String, RouterError> {
        self.view(asset::signatures::TOKEN_URI, &id)
    }

    // -------------------------------------------------------------------------
    // Owner and operators
    // -------------------------------------------------------------------------

    /// Grant operator rights.
    pub fn add_operator(&self, caller: Address, operator: Address) -> Result<(), RouterError> {
        self.send(caller, operators::signatures::ADD_OPERATOR, &operator)
    }

    /// Revoke operator rights.
    pub fn remove_operator(&self, caller: Address, operator: Address) -> Result<(), RouterError> {
        self.send(caller, operators::signatures::REMOVE_OPERATOR, &operator)
    }

    /// True if `account` is an operator.
    pub fn is_operator(&self, account: Address) -> Result<bool, RouterError> {
        self.view(operators::signatures::IS_OPERATOR, &account)
    }

    /// Operator snapshot.
    pub fn operators(&self) -> Result<Vec<Address>, RouterError> {
        self.view(operators::signatures::GET_OPERATORS, &())
    }

    /// Current owner.
    pub fn owner(&self) -> Result<Address, RouterError> {
        self.view(operators::signatures::OWNER, &())
    }

    /// Nominated owner.
    pub fn pending_owner(&self) -> Result<Option<Address>, RouterError> {
        self.view(operators::signatures::PENDING_OWNER, &())
    }

    /// Nominate a new owner.
    pub fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<(), RouterError> {
        self.send(caller, operators::signatures::TRANSFER_OWNERSHIP, &new_owner)
    }

    /// Accept a nomination.
    pub fn accept_ownership(&self, caller: Address) -> Result<(), RouterError> {
        self.send(caller, operators::signatures::ACCEPT_OWNERSHIP, &())
    }

    // -------------------------------------------------------------------------
    // Consent
    // -------------------------------------------------------------------------

    /// Domain separator reported by the router.
    pub fn domain_separator(&self) -> Result<Hash, RouterError> {
        self.view(consent::signatures::DOMAIN_SEPARATOR, &())
    }

    /// True if `digest` was consumed.
    pub fn is_consumed(&self, digest: Hash) -> Result<bool, RouterError> {
        self.view(consent::signatures::IS_CONSUMED, &digest)
    }
}

fn entry_ref(entry: impl Into<EntryRef>) -> EntryRef {
    entry.into()
}
