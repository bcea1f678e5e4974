//! # Registry Flows
//!
//! End-to-end scenarios through the router:
//!
//! 1. **Creation**: operator submits, beneficiary consents, asset minted
//! 2. **Authority**: removed operators and strangers are rejected
//! 3. **Updates**: consent follows the live asset holder
//! 4. **Atomicity**: failed calls leave no state, logs or consumed digests

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use gr_03_consent_verification::ConsentError;
    use gr_04_operator_registry::OperatorError;
    use gr_05_item_registry::{create_struct_hash, EntryRef, RegistryError};
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{ErrorKind, Observation};

    // =========================================================================
    // CREATION
    // =========================================================================

    #[test]
    fn test_operator_creates_entry_with_beneficiary_consent() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let log_start = fx.client.router().log_len();

        let uuid = new_uuid();
        let request = fx
            .client
            .sign_create(&alice, &uuid, "ipfs://game-1", fx.deadline())
            .unwrap();
        let id = fx.client.create_game(OPERATOR, &request).unwrap();

        assert_eq!(id, 1);
        assert_eq!(fx.client.id_for(&uuid).unwrap(), 1);
        assert_eq!(fx.client.uuid_for(1).unwrap(), uuid);
        assert_eq!(fx.client.owner_of(1).unwrap(), alice.address());
        assert_eq!(fx.client.balance_of(alice.address()).unwrap(), 1);
        assert_eq!(fx.client.token_uri(1).unwrap(), "ipfs://game-1");
        assert_eq!(fx.client.total_issued().unwrap(), 1);

        let names: Vec<_> = fx
            .observations_since(log_start)
            .iter()
            .map(Observation::name)
            .collect();
        assert_eq!(names, vec!["ConsentConsumed", "AssetTransferred", "EntryCreated"]);
    }

    #[test]
    fn test_ids_are_sequential() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();

        let ids: Vec<u64> = (0..3)
            .map(|i| {
                let key = if i % 2 == 0 { &alice } else { &bob };
                fx.create_for(key, "ipfs://game").0
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(fx.client.total_issued().unwrap(), 3);
        assert_eq!(fx.client.balance_of(alice.address()).unwrap(), 2);
    }

    #[test]
    fn test_owner_may_create_without_operator_role() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let request = fx
            .client
            .sign_create(&alice, &new_uuid(), "ipfs://game", fx.deadline())
            .unwrap();
        assert_eq!(fx.client.create_game(OWNER, &request).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_uuid_rejected() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let (_, uuid) = fx.create_for(&alice, "ipfs://game");

        let request = fx
            .client
            .sign_create(&alice, &uuid, "ipfs://again", fx.deadline())
            .unwrap();
        let err = fx.client.create_game(OPERATOR, &request).unwrap_err();
        let kind = expect_registry_error(&err, &RegistryError::UuidAlreadyRegistered(uuid));
        assert_eq!(kind, ErrorKind::StateConflict);
    }

    #[test]
    fn test_signer_mismatch_on_create() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let mallory = Secp256k1KeyPair::generate();

        let mut request = fx
            .client
            .sign_create(&mallory, &new_uuid(), "ipfs://game", fx.deadline())
            .unwrap();
        request.beneficiary = alice.address();

        let err = fx.client.create_game(OPERATOR, &request).unwrap_err();
        match registry_error(&err) {
            Some(RegistryError::SignerMismatch { expected, .. }) => {
                assert_eq!(*expected, alice.address());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fx.client.total_issued().unwrap(), 0);
    }

    // =========================================================================
    // AUTHORITY
    // =========================================================================

    #[test]
    fn test_removed_operator_loses_authority() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        fx.client.remove_operator(OWNER, OPERATOR).unwrap();
        assert!(!fx.client.is_operator(OPERATOR).unwrap());

        let request = fx
            .client
            .sign_create(&alice, &new_uuid(), "ipfs://game", fx.deadline())
            .unwrap();
        let err = fx.client.create_game(OPERATOR, &request).unwrap_err();
        let kind = expect_registry_error(&err, &RegistryError::NotAuthorized { caller: OPERATOR });
        assert_eq!(kind, ErrorKind::Authorization);

        // The rejected call did not burn the signature.
        assert_eq!(fx.client.create_game(OWNER, &request).unwrap(), 1);
    }

    #[test]
    fn test_stranger_cannot_manage_operators() {
        let fx = Fixture::new();
        let err = fx.client.add_operator(STRANGER, STRANGER).unwrap_err();
        assert_eq!(
            err.module_error::<OperatorError>(),
            Some(&OperatorError::NotOwner { caller: STRANGER })
        );
        assert_eq!(fx.client.operators().unwrap(), vec![OPERATOR]);
    }

    #[test]
    fn test_admin_and_owner_are_independent() {
        let fx = Fixture::new();
        assert!(fx.client.add_operator(ADMIN, STRANGER).is_err());
        assert!(fx
            .client
            .router()
            .transfer_admin(OWNER, STRANGER)
            .is_err());

        fx.client.transfer_ownership(OWNER, STRANGER).unwrap();
        assert_eq!(fx.client.pending_owner().unwrap(), Some(STRANGER));
        fx.client.accept_ownership(STRANGER).unwrap();

        assert_eq!(fx.client.owner().unwrap(), STRANGER);
        assert_eq!(fx.client.router().admin().unwrap(), ADMIN);
        assert!(fx.client.add_operator(OWNER, ADMIN).is_err());
        fx.client.add_operator(STRANGER, ADMIN).unwrap();
    }

    // =========================================================================
    // UPDATES
    // =========================================================================

    #[test]
    fn test_update_consent_follows_live_holder() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();
        let (id, uuid) = fx.create_for(&alice, "ipfs://v1");

        fx.client
            .transfer_asset(alice.address(), bob.address(), id)
            .unwrap();
        assert_eq!(fx.client.owner_of(id).unwrap(), bob.address());

        let deadline = fx.deadline();
        let stale = fx.client.sign_update(&alice, &uuid, "ipfs://v2", deadline).unwrap();
        let err = fx
            .client
            .update_uri_consented(OPERATOR, id, "ipfs://v2", deadline, &stale)
            .unwrap_err();
        assert_eq!(
            registry_error(&err),
            Some(&RegistryError::SignerMismatch {
                expected: bob.address(),
                actual: alice.address(),
            })
        );

        let fresh = fx.client.sign_update(&bob, &uuid, "ipfs://v2", deadline).unwrap();
        fx.client
            .update_uri_consented(OPERATOR, uuid.as_str(), "ipfs://v2", deadline, &fresh)
            .unwrap();
        assert_eq!(fx.client.uri(id).unwrap(), "ipfs://v2");
        assert_eq!(fx.client.token_uri(id).unwrap(), "ipfs://v2");
    }

    #[test]
    fn test_operator_update_needs_no_signature() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let (id, uuid) = fx.create_for(&alice, "ipfs://v1");

        let updated = fx
            .client
            .update_uri_by_operator(OPERATOR, uuid.as_str(), "ipfs://v9")
            .unwrap();
        assert_eq!(updated, id);
        let entry = fx.client.entry(id).unwrap();
        assert_eq!(entry.uuid, uuid);
        assert_eq!(entry.uri, "ipfs://v9");

        let err = fx
            .client
            .update_uri_by_operator(STRANGER, id, "ipfs://v10")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn test_update_unknown_entry() {
        let fx = Fixture::new();
        let err = fx
            .client
            .update_uri_by_operator(OPERATOR, 42u64, "ipfs://x")
            .unwrap_err();
        expect_registry_error(&err, &RegistryError::EntryNotFound(EntryRef::Id(42)));
        assert!(!fx.client.exists(42u64).unwrap());
        assert_eq!(fx.client.id_for(&new_uuid()).unwrap(), 0);
    }

    // =========================================================================
    // DEADLINES AND ATOMICITY
    // =========================================================================

    #[test]
    fn test_expired_deadline_reported_before_replay() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let (id, uuid) = fx.create_for(&alice, "ipfs://v1");

        let deadline = fx.deadline();
        let signature = fx.client.sign_update(&alice, &uuid, "ipfs://v2", deadline).unwrap();
        fx.client
            .update_uri_consented(OPERATOR, id, "ipfs://v2", deadline, &signature)
            .unwrap();

        fx.clock.set(deadline + 1);
        let err = fx
            .client
            .update_uri_consented(OPERATOR, id, "ipfs://v2", deadline, &signature)
            .unwrap_err();
        assert_eq!(
            registry_error(&err),
            Some(&RegistryError::Consent(ConsentError::ConsentExpired {
                deadline,
                now: deadline + 1,
            }))
        );
    }

    #[test]
    fn test_deadline_is_inclusive() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let deadline = fx.deadline();
        let request = fx
            .client
            .sign_create(&alice, &new_uuid(), "ipfs://game", deadline)
            .unwrap();
        fx.clock.set(deadline);
        assert!(fx.client.create_game(OPERATOR, &request).is_ok());
    }

    #[test]
    fn test_failed_call_leaves_no_trace() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let router = fx.client.router();
        let logs = router.log_len();
        let block = router.block_number();

        let uuid = new_uuid();
        let deadline = fx.deadline();
        let request = fx
            .client
            .sign_create(&alice, &uuid, &"x".repeat(4096), deadline)
            .unwrap();
        let err = fx.client.create_game(OPERATOR, &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let digest = fx.client.domain().digest(&create_struct_hash(
            &uuid,
            &alice.address(),
            &request.uri,
            deadline,
        ));
        assert!(!fx.client.is_consumed(digest).unwrap());
        assert_eq!(router.log_len(), logs);
        assert_eq!(router.block_number(), block);
        assert_eq!(fx.client.id_for(&uuid).unwrap(), 0);
    }
}
