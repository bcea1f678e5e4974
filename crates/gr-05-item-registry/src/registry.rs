//! # Item Registry
//!
//! Entry state machine over the registry region. Every mutation runs in
//! this order:
//!
//! 1. Caller is the owner or an operator
//! 2. Input and state validations
//! 3. Consent verification (consent-gated operations only)
//! 4. Signer check against the expected principal
//! 5. Writes and observations
//!
//! Consent is verified last among the checks, so a call rejected for any
//! other reason leaves the signature unconsumed.

use crate::domain::{
    create_struct_hash, update_struct_hash, Entry, EntryRef, RegistryError, RegistryLayout,
    RegistryLimits,
};
use crate::ports::AssetLedger;
use gr_01_namespaced_storage::SlotStore;
use gr_02_module_router::CallContext;
use gr_03_consent_verification::ConsentVerifier;
use gr_04_operator_registry::AccessControl;
use registry_telemetry::{component_span, log_entry_event, log_event};
use shared_types::{Address, Observation};
use std::sync::Arc;

const COMPONENT: &str = "registry";

/// Consent-carrying creation request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateRequest {
    /// External identifier.
    pub uuid: String,
    /// Receives the asset; must be the consent signer.
    pub beneficiary: Address,
    /// Metadata URI.
    pub uri: String,
    /// Last valid block time of the consent.
    pub deadline: u64,
    /// 65-byte recoverable signature.
    pub signature: Vec<u8>,
}

/// Registry operations bound to an asset ledger.
#[derive(Clone)]
pub struct ItemRegistry {
    ledger: Arc<dyn AssetLedger>,
}

impl ItemRegistry {
    /// Create a registry backed by `ledger`.
    pub fn new(ledger: Arc<dyn AssetLedger>) -> Self {
        Self { ledger }
    }

    /// The asset ledger.
    pub fn ledger(&self) -> &Arc<dyn AssetLedger> {
        &self.ledger
    }

    /// Write limits and start the id counter at 1. Runs once.
    pub fn initialize(ctx: &mut CallContext<'_>, limits: RegistryLimits) -> Result<(), RegistryError> {
        if RegistryLayout::is_initialized(ctx.store())? {
            return Err(RegistryError::AlreadyInitialized);
        }
        let store = ctx.store_mut();
        RegistryLayout::limits().set(store, &limits)?;
        RegistryLayout::next_id().set(store, &1)?;
        RegistryLayout::initialized().set(store, &true)?;
        log_event!(
            info,
            COMPONENT,
            "Registry initialized",
            uuid_length = limits.uuid_length,
            max_uri_length = limits.max_uri_length
        );
        Ok(())
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Create an entry for `request.beneficiary`, who must have signed the
    /// `CreateGame` consent. Returns the new id.
    pub fn create(&self, ctx: &mut CallContext<'_>, request: CreateRequest) -> Result<u64, RegistryError> {
        let _span = component_span!("create_entry", component = COMPONENT, uuid = %request.uuid).entered();
        require_authorized(ctx)?;
        let limits = Self::limits(ctx.store())?;

        let CreateRequest {
            uuid,
            beneficiary,
            uri,
            deadline,
            signature,
        } = request;

        if beneficiary.is_zero() {
            return Err(RegistryError::ZeroAddress);
        }
        validate_uuid(&limits, &uuid)?;
        if RegistryLayout::id_for(ctx.store(), &uuid)? != 0 {
            return Err(RegistryError::UuidAlreadyRegistered(uuid));
        }
        validate_uri(&limits, &uri)?;
        let id = RegistryLayout::next_id().get_or_default(ctx.store())?;
        if id == 0 {
            return Err(RegistryError::IdOverflow);
        }
        self.ledger.check_mint(ctx.store(), &beneficiary, id)?;

        let struct_hash = create_struct_hash(&uuid, &beneficiary, &uri, deadline);
        let signer = ConsentVerifier::verify(ctx, &struct_hash, deadline, &signature)?;
        if !signer.is(&beneficiary) {
            return Err(RegistryError::SignerMismatch {
                expected: beneficiary,
                actual: signer.address(),
            });
        }

        let store = ctx.store_mut();
        RegistryLayout::next_id().set(store, &id.wrapping_add(1))?;
        RegistryLayout::uuid_to_id().insert(store, &uuid, &id)?;
        RegistryLayout::id_to_uuid().insert(store, &id, &uuid)?;
        RegistryLayout::uris().insert(store, &id, &uri)?;
        self.ledger.mint(ctx, beneficiary, id)?;

        log_entry_event!(info, COMPONENT, "Entry created", id, uuid, beneficiary = %beneficiary);
        ctx.emit(Observation::EntryCreated {
            id,
            uuid,
            beneficiary,
            uri,
        });
        Ok(id)
    }

    /// Overwrite the URI with consent from the entry's current holder.
    pub fn update_uri_consented(
        &self,
        ctx: &mut CallContext<'_>,
        entry: &EntryRef,
        new_uri: String,
        deadline: u64,
        signature: &[u8],
    ) -> Result<u64, RegistryError> {
        require_authorized(ctx)?;
        let (id, uuid) = resolve(ctx.store(), entry)?;
        validate_uri(&Self::limits(ctx.store())?, &new_uri)?;

        let struct_hash = update_struct_hash(&uuid, &new_uri, deadline);
        let signer = ConsentVerifier::verify(ctx, &struct_hash, deadline, signature)?;
        let holder = self
            .ledger
            .owner_of(ctx.store(), id)?
            .ok_or(RegistryError::EntryNotFound(EntryRef::Id(id)))?;
        if !signer.is(&holder) {
            return Err(RegistryError::SignerMismatch {
                expected: holder,
                actual: signer.address(),
            });
        }

        write_uri(ctx, id, uuid, new_uri)?;
        Ok(id)
    }

    /// Overwrite the URI on operator authority alone.
    pub fn update_uri_by_operator(
        &self,
        ctx: &mut CallContext<'_>,
        entry: &EntryRef,
        new_uri: String,
    ) -> Result<u64, RegistryError> {
        require_authorized(ctx)?;
        let (id, uuid) = resolve(ctx.store(), entry)?;
        validate_uri(&Self::limits(ctx.store())?, &new_uri)?;
        write_uri(ctx, id, uuid, new_uri)?;
        Ok(id)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Stored limits.
    pub fn limits<S: SlotStore + ?Sized>(store: &S) -> Result<RegistryLimits, RegistryError> {
        RegistryLayout::limits()
            .get(store)?
            .ok_or(RegistryError::NotInitialized)
    }

    /// Id for `uuid`; 0 when absent.
    pub fn id_for<S: SlotStore + ?Sized>(store: &S, uuid: &str) -> Result<u64, RegistryError> {
        Ok(RegistryLayout::id_for(store, uuid)?)
    }

    /// UUID of `id`.
    pub fn uuid_for<S: SlotStore + ?Sized>(store: &S, id: u64) -> Result<String, RegistryError> {
        RegistryLayout::uuid_for(store, id)?.ok_or(RegistryError::EntryNotFound(EntryRef::Id(id)))
    }

    /// True if `entry` resolves.
    pub fn exists<S: SlotStore + ?Sized>(store: &S, entry: &EntryRef) -> Result<bool, RegistryError> {
        match resolve(store, entry) {
            Ok(_) => Ok(true),
            Err(RegistryError::EntryNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Number of ids ever assigned.
    pub fn total_issued<S: SlotStore + ?Sized>(store: &S) -> Result<u64, RegistryError> {
        if !RegistryLayout::is_initialized(store)? {
            return Ok(0);
        }
        Ok(RegistryLayout::next_id()
            .get_or_default(store)?
            .wrapping_sub(1))
    }

    /// Current URI of `entry`.
    pub fn uri<S: SlotStore + ?Sized>(store: &S, entry: &EntryRef) -> Result<String, RegistryError> {
        Ok(Self::entry(store, entry)?.uri)
    }

    /// Full record of `entry`.
    pub fn entry<S: SlotStore + ?Sized>(store: &S, entry: &EntryRef) -> Result<Entry, RegistryError> {
        let (id, uuid) = resolve(store, entry)?;
        let uri = RegistryLayout::uri_of(store, id)?.unwrap_or_default();
        Ok(Entry { id, uuid, uri })
    }
}

fn require_authorized(ctx: &CallContext<'_>) -> Result<Address, RegistryError> {
    let caller = ctx.caller();
    if !AccessControl::is_owner_or_operator(ctx.store(), &caller)? {
        return Err(RegistryError::NotAuthorized { caller });
    }
    Ok(caller)
}

fn validate_uuid(limits: &RegistryLimits, uuid: &str) -> Result<(), RegistryError> {
    if uuid.is_empty() {
        return Err(RegistryError::EmptyUuid);
    }
    if uuid.len() != limits.uuid_length as usize {
        return Err(RegistryError::InvalidUuidLength {
            expected: limits.uuid_length,
            actual: uuid.len(),
        });
    }
    Ok(())
}

fn validate_uri(limits: &RegistryLimits, uri: &str) -> Result<(), RegistryError> {
    if uri.is_empty() {
        return Err(RegistryError::EmptyUri);
    }
    if uri.len() > limits.max_uri_length as usize {
        return Err(RegistryError::UriTooLong {
            max: limits.max_uri_length,
            actual: uri.len(),
        });
    }
    Ok(())
}

fn resolve<S: SlotStore + ?Sized>(store: &S, entry: &EntryRef) -> Result<(u64, String), RegistryError> {
    let not_found = || RegistryError::EntryNotFound(entry.clone());
    match entry {
        EntryRef::Uuid(uuid) => match RegistryLayout::id_for(store, uuid)? {
            0 => Err(not_found()),
            id => Ok((id, uuid.clone())),
        },
        EntryRef::Id(id) => {
            let uuid = RegistryLayout::uuid_for(store, *id)?.ok_or_else(not_found)?;
            Ok((*id, uuid))
        }
    }
}

fn write_uri(
    ctx: &mut CallContext<'_>,
    id: u64,
    uuid: String,
    new_uri: String,
) -> Result<(), RegistryError> {
    RegistryLayout::uris().insert(ctx.store_mut(), &id, &new_uri)?;
    log_entry_event!(info, COMPONENT, "Entry URI updated", id, uuid, uri = %new_uri);
    ctx.emit(Observation::EntryUriUpdated { id, uuid, new_uri });
    Ok(())
}
