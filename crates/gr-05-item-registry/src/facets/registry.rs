//! # Registry Facet
//!
//! | Function | Gate | Returns |
//! |----------|------|---------|
//! | `createGame` | owner/operator + beneficiary consent | id |
//! | `updateGameUri` | owner/operator + holder consent | id |
//! | `setGameUri` | owner/operator | id |
//! | `idForUuid` | none | id, 0 when absent |
//! | `uuidForId` | none | uuid |
//! | `exists` | none | bool |
//! | `totalIssued` | none | count |
//! | `gameUri` | none | uri |
//! | `getEntry` | none | [`Entry`] |
//! | `registryLimits` | none | [`RegistryLimits`] |
//! | `createStructHash` / `updateStructHash` | none | struct hash |
//!
//! [`Entry`]: crate::domain::Entry
//! [`RegistryLimits`]: crate::domain::RegistryLimits

use crate::domain::{create_struct_hash, update_struct_hash, EntryRef};
use crate::registry::{CreateRequest, ItemRegistry};
use gr_02_module_router::{decode_args, encode_output, CallContext, Facet, FacetError};
use shared_crypto::{interface_id, selector};
use shared_types::{Address, Selector};

/// Canonical signatures of the registry functions.
pub mod signatures {
    /// Consent-gated creation.
    pub const CREATE_GAME: &str = "createGame(string,address,string,uint256,bytes)";
    /// Consent-gated URI update.
    pub const UPDATE_GAME_URI: &str = "updateGameUri((uint8,uint256,string),string,uint256,bytes)";
    /// Operator URI update.
    pub const SET_GAME_URI: &str = "setGameUri((uint8,uint256,string),string)";
    /// `idForUuid(string)`
    pub const ID_FOR_UUID: &str = "idForUuid(string)";
    /// `uuidForId(uint256)`
    pub const UUID_FOR_ID: &str = "uuidForId(uint256)";
    /// `exists(entry)`
    pub const EXISTS: &str = "exists((uint8,uint256,string))";
    /// `totalIssued()`
    pub const TOTAL_ISSUED: &str = "totalIssued()";
    /// `gameUri(entry)`
    pub const GAME_URI: &str = "gameUri((uint8,uint256,string))";
    /// `getEntry(entry)`
    pub const GET_ENTRY: &str = "getEntry((uint8,uint256,string))";
    /// `registryLimits()`
    pub const REGISTRY_LIMITS: &str = "registryLimits()";
    /// Struct hash helper for creation consents.
    pub const CREATE_STRUCT_HASH: &str = "createStructHash(string,address,string,uint256)";
    /// Struct hash helper for update consents.
    pub const UPDATE_STRUCT_HASH: &str = "updateStructHash(string,string,uint256)";

    pub(crate) const ALL: [&str; 12] = [
        CREATE_GAME,
        UPDATE_GAME_URI,
        SET_GAME_URI,
        ID_FOR_UUID,
        UUID_FOR_ID,
        EXISTS,
        TOTAL_ISSUED,
        GAME_URI,
        GET_ENTRY,
        REGISTRY_LIMITS,
        CREATE_STRUCT_HASH,
        UPDATE_STRUCT_HASH,
    ];
}

/// Registry interface id.
#[must_use]
pub fn registry_interface() -> Selector {
    interface_id(&signatures::ALL)
}

/// Entry creation, URI updates and lookups.
#[derive(Clone)]
pub struct RegistryFacet {
    registry: ItemRegistry,
}

impl RegistryFacet {
    /// Create the facet over `registry`.
    pub fn new(registry: ItemRegistry) -> Self {
        Self { registry }
    }
}

impl Facet for RegistryFacet {
    fn name(&self) -> &'static str {
        "registry"
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

        if sel == selector(CREATE_GAME) {
            let request: CreateRequest = decode_args(args)?;
            encode_output(&self.registry.create(ctx, request)?)
        } else if sel == selector(UPDATE_GAME_URI) {
            let (entry, new_uri, deadline, signature): (EntryRef, String, u64, Vec<u8>) =
                decode_args(args)?;
            let id = self
                .registry
                .update_uri_consented(ctx, &entry, new_uri, deadline, &signature)?;
            encode_output(&id)
        } else if sel == selector(SET_GAME_URI) {
            let (entry, new_uri): (EntryRef, String) = decode_args(args)?;
            encode_output(&self.registry.update_uri_by_operator(ctx, &entry, new_uri)?)
        } else if sel == selector(ID_FOR_UUID) {
            let uuid: String = decode_args(args)?;
            encode_output(&ItemRegistry::id_for(ctx.store(), &uuid)?)
        } else if sel == selector(UUID_FOR_ID) {
            let id: u64 = decode_args(args)?;
            encode_output(&ItemRegistry::uuid_for(ctx.store(), id)?)
        } else if sel == selector(EXISTS) {
            let entry: EntryRef = decode_args(args)?;
            encode_output(&ItemRegistry::exists(ctx.store(), &entry)?)
        } else if sel == selector(TOTAL_ISSUED) {
            encode_output(&ItemRegistry::total_issued(ctx.store())?)
        } else if sel == selector(GAME_URI) {
            let entry: EntryRef = decode_args(args)?;
            encode_output(&ItemRegistry::uri(ctx.store(), &entry)?)
        } else if sel == selector(GET_ENTRY) {
            let entry: EntryRef = decode_args(args)?;
            encode_output(&ItemRegistry::entry(ctx.store(), &entry)?)
        } else if sel == selector(REGISTRY_LIMITS) {
            encode_output(&ItemRegistry::limits(ctx.store())?)
        } else if sel == selector(CREATE_STRUCT_HASH) {
            let (uuid, beneficiary, uri, deadline): (String, Address, String, u64) =
                decode_args(args)?;
            encode_output(&create_struct_hash(&uuid, &beneficiary, &uri, deadline))
        } else if sel == selector(UPDATE_STRUCT_HASH) {
            let (uuid, new_uri, deadline): (String, String, u64) = decode_args(args)?;
            encode_output(&update_struct_hash(&uuid, &new_uri, deadline))
        } else {
            Err(FacetError::UnhandledSelector(sel))
        }
    }
}
