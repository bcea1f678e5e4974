//! # Consent Verifier
//!
//! Library code linked into consent-gated modules; it runs inside their
//! call context against the consent region.
//!
//! ## Verification order
//!
//! 1. Deadline: block time past `deadline` → `ConsentExpired`
//! 2. Digest: `keccak256(0x19 0x01 ‖ domain_separator ‖ struct_hash)`
//! 3. Replay: digest already consumed → `ConsentAlreadyUsed`
//! 4. Recovery: malformed, high-s, bad `v` or null signer → `InvalidSigner`
//! 5. Record the digest, emit `ConsentConsumed`, return the signer
//!
//! Expiry is checked before anything else, so an expired signature reports
//! `ConsentExpired` even if it is also a replay.

use crate::domain::{ConsentError, ConsentLayout, RecoveredSigner};
use gr_01_namespaced_storage::SlotStore;
use gr_02_module_router::CallContext;
use shared_crypto::{recover_address, CryptoError, Eip712Domain, RecoverableSignature};
use shared_types::{Address, Hash, Observation};
use tracing::{debug, info};

const COMPONENT: &str = "consent";

/// Stateless verifier over the consent region.
pub struct ConsentVerifier;

impl ConsentVerifier {
    /// Store the domain name and version. Runs once.
    pub fn initialize(
        ctx: &mut CallContext<'_>,
        name: &str,
        version: &str,
    ) -> Result<(), ConsentError> {
        if ConsentLayout::name().get(ctx.store())?.is_some() {
            return Err(ConsentError::AlreadyInitialized);
        }
        ConsentLayout::name().set(ctx.store_mut(), &name.to_string())?;
        ConsentLayout::version().set(ctx.store_mut(), &version.to_string())?;
        info!(component = COMPONENT, name, version, "Consent domain initialized");
        Ok(())
    }

    /// Signing domain of this deployment: stored name and version, the
    /// call's chain id and the router address.
    pub fn domain(ctx: &CallContext<'_>) -> Result<Eip712Domain, ConsentError> {
        let store = ctx.store();
        let name = ConsentLayout::name()
            .get(store)?
            .ok_or(ConsentError::NotInitialized)?;
        let version = ConsentLayout::version()
            .get(store)?
            .ok_or(ConsentError::NotInitialized)?;
        Ok(Eip712Domain::new(name, version, ctx.chain().chain_id, ctx.this()))
    }

    /// Domain separator of this deployment.
    pub fn domain_separator(ctx: &CallContext<'_>) -> Result<Hash, ConsentError> {
        Ok(Self::domain(ctx)?.separator())
    }

    /// True if `digest` was consumed.
    pub fn is_consumed<S: SlotStore + ?Sized>(store: &S, digest: &Hash) -> Result<bool, ConsentError> {
        Ok(ConsentLayout::is_consumed(store, digest)?)
    }

    /// Verify and consume a consent signature over `struct_hash`.
    pub fn verify(
        ctx: &mut CallContext<'_>,
        struct_hash: &Hash,
        deadline: u64,
        signature: &[u8],
    ) -> Result<RecoveredSigner, ConsentError> {
        let now = ctx.block_timestamp();
        if now > deadline {
            return Err(ConsentError::ConsentExpired { deadline, now });
        }

        let digest = Self::domain(ctx)?.digest(struct_hash);

        if ConsentLayout::is_consumed(ctx.store(), &digest)? {
            return Err(ConsentError::ConsentAlreadyUsed(digest));
        }

        let signer = recover(&digest, signature)?;

        ConsentLayout::consume(ctx.store_mut(), &digest)?;
        ctx.emit(Observation::ConsentConsumed { digest, signer });
        debug!(component = COMPONENT, digest = %digest, signer = %signer, "Consent consumed");

        Ok(RecoveredSigner::new(signer, digest))
    }
}

fn recover(digest: &Hash, signature: &[u8]) -> Result<Address, ConsentError> {
    let signature = RecoverableSignature::from_slice(signature).map_err(ConsentError::InvalidSigner)?;
    let signer = recover_address(digest, &signature).map_err(ConsentError::InvalidSigner)?;
    if signer.is_zero() {
        return Err(ConsentError::InvalidSigner(CryptoError::RecoveryFailed));
    }
    Ok(signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_01_namespaced_storage::InMemorySlotStore;
    use shared_crypto::{keccak256, Secp256k1KeyPair};
    use shared_types::ChainContext;

    const ROUTER: Address = Address::repeat_byte(0x01);

    struct Harness {
        store: InMemorySlotStore,
        observations: Vec<Observation>,
        now: u64,
    }

    impl Harness {
        fn new() -> Self {
            let mut harness = Self {
                store: InMemorySlotStore::new(),
                observations: Vec::new(),
                now: 1_000,
            };
            harness
                .run(|ctx| ConsentVerifier::initialize(ctx, "GameRegistry", "1"))
                .unwrap();
            harness
        }

        fn run<T>(
            &mut self,
            f: impl FnOnce(&mut CallContext<'_>) -> Result<T, ConsentError>,
        ) -> Result<T, ConsentError> {
            let chain = ChainContext {
                chain_id: 31337,
                block_number: 1,
                block_timestamp: self.now,
            };
            let mut ctx = CallContext::new(
                Address::repeat_byte(0xCA),
                ROUTER,
                chain,
                &mut self.store,
                &mut self.observations,
            );
            f(&mut ctx)
        }

        fn sign(&mut self, key: &Secp256k1KeyPair, struct_hash: &Hash) -> Vec<u8> {
            let domain = self.run(|ctx| ConsentVerifier::domain(ctx)).unwrap();
            key.sign_digest(&domain.digest(struct_hash)).unwrap().to_vec()
        }
    }

    #[test]
    fn test_verify_recovers_and_consumes() {
        let mut h = Harness::new();
        let key = Secp256k1KeyPair::generate();
        let struct_hash = keccak256(b"payload");
        let sig = h.sign(&key, &struct_hash);

        let signer = h
            .run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &sig))
            .unwrap();
        assert!(signer.is(&key.address()));
        assert!(ConsentVerifier::is_consumed(&h.store, &signer.digest()).unwrap());
        assert!(matches!(
            h.observations.last(),
            Some(Observation::ConsentConsumed { signer: s, .. }) if *s == key.address()
        ));
    }

    #[test]
    fn test_replay_rejected() {
        let mut h = Harness::new();
        let key = Secp256k1KeyPair::generate();
        let struct_hash = keccak256(b"payload");
        let sig = h.sign(&key, &struct_hash);

        h.run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &sig))
            .unwrap();
        let err = h
            .run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &sig))
            .unwrap_err();
        assert!(matches!(err, ConsentError::ConsentAlreadyUsed(_)));
    }

    #[test]
    fn test_deadline_is_inclusive() {
        let mut h = Harness::new();
        let key = Secp256k1KeyPair::generate();
        let struct_hash = keccak256(b"edge");
        let sig = h.sign(&key, &struct_hash);

        h.now = 2_000;
        assert!(h
            .run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &sig))
            .is_ok());
    }

    #[test]
    fn test_expiry_precedes_replay() {
        let mut h = Harness::new();
        let key = Secp256k1KeyPair::generate();
        let struct_hash = keccak256(b"payload");
        let sig = h.sign(&key, &struct_hash);

        h.run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &sig))
            .unwrap();

        h.now = 2_001;
        let err = h
            .run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &sig))
            .unwrap_err();
        assert_eq!(
            err,
            ConsentError::ConsentExpired {
                deadline: 2_000,
                now: 2_001
            }
        );
    }

    #[test]
    fn test_malformed_signature_is_invalid_signer() {
        let mut h = Harness::new();
        let struct_hash = keccak256(b"payload");

        let err = h
            .run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &[0u8; 64]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConsentError::InvalidSigner(CryptoError::InvalidSignatureLength { .. })
        ));

        let err = h
            .run(|ctx| ConsentVerifier::verify(ctx, &struct_hash, 2_000, &[0u8; 65]))
            .unwrap_err();
        assert!(matches!(err, ConsentError::InvalidSigner(_)));
        assert!(h.observations.is_empty());
    }

    #[test]
    fn test_domain_binds_router_and_chain() {
        let mut h = Harness::new();
        let domain = h.run(|ctx| ConsentVerifier::domain(ctx)).unwrap();
        assert_eq!(domain.verifying_contract, ROUTER);
        assert_eq!(domain.chain_id, 31337);
        assert_eq!(domain.name, "GameRegistry");
    }

    #[test]
    fn test_initialize_once() {
        let mut h = Harness::new();
        assert_eq!(
            h.run(|ctx| ConsentVerifier::initialize(ctx, "Other", "2")),
            Err(ConsentError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_uninitialized_domain() {
        let mut store = InMemorySlotStore::new();
        let mut observations = Vec::new();
        let ctx = CallContext::new(
            Address::ZERO,
            ROUTER,
            ChainContext::default(),
            &mut store,
            &mut observations,
        );
        assert_eq!(
            ConsentVerifier::domain_separator(&ctx),
            Err(ConsentError::NotInitialized)
        );
    }
}
