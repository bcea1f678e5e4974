//! # Consent Attacks
//!
//! Each test submits a signature the registry must refuse:
//!
//! | Attack | Expected outcome |
//! |--------|------------------|
//! | Replay of a consumed update | `ConsentAlreadyUsed` |
//! | Signature from another router or chain | `SignerMismatch` |
//! | High-s twin of a valid signature | `InvalidSigner(MalleableSignature)` |
//! | Truncated or zeroed signature | `InvalidSigner` |
//! | Operator swaps the signed URI | `SignerMismatch` |
//! | Stale holder consent after a transfer | `SignerMismatch`, digest left unconsumed |

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use gr_03_consent_verification::ConsentError;
    use gr_05_item_registry::{create_struct_hash, update_struct_hash, RegistryError};
    use shared_crypto::{CryptoError, Eip712Domain, Secp256k1KeyPair};
    use shared_types::{Address, ErrorKind};

    /// secp256k1 group order.
    const ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];

    /// The (n - s, v ^ 1) twin of a low-s signature; recovers the same key.
    fn malleate(signature: &[u8]) -> Vec<u8> {
        let mut twin = signature.to_vec();
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = i16::from(ORDER[i]) - i16::from(signature[32 + i]) - borrow;
            borrow = i16::from(diff < 0);
            if diff < 0 {
                diff += 256;
            }
            twin[32 + i] = diff as u8;
        }
        twin[64] = if signature[64] == 27 { 28 } else { 27 };
        twin
    }

    fn invalid_signer(err: &gr_02_module_router::RouterError) -> Option<&CryptoError> {
        match registry_error(err) {
            Some(RegistryError::Consent(ConsentError::InvalidSigner(cause))) => Some(cause),
            _ => None,
        }
    }

    #[test]
    fn test_replayed_update_rejected() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let (id, uuid) = fx.create_for(&alice, "ipfs://v1");

        let deadline = fx.deadline();
        let signature = fx.client.sign_update(&alice, &uuid, "ipfs://v2", deadline).unwrap();
        fx.client
            .update_uri_consented(OPERATOR, id, "ipfs://v2", deadline, &signature)
            .unwrap();
        fx.client
            .update_uri_by_operator(OPERATOR, id, "ipfs://v1")
            .unwrap();

        let err = fx
            .client
            .update_uri_consented(OPERATOR, id, "ipfs://v2", deadline, &signature)
            .unwrap_err();
        let digest = fx
            .client
            .domain()
            .digest(&update_struct_hash(&uuid, "ipfs://v2", deadline));
        let kind = expect_registry_error(
            &err,
            &RegistryError::Consent(ConsentError::ConsentAlreadyUsed(digest)),
        );
        assert_eq!(kind, ErrorKind::Consent);
        assert_eq!(fx.client.uri(id).unwrap(), "ipfs://v1");
    }

    #[test]
    fn test_replayed_creation_with_fresh_uuid_fails() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let request = fx
            .client
            .sign_create(&alice, &new_uuid(), "ipfs://game", fx.deadline())
            .unwrap();
        fx.client.create_game(OPERATOR, &request).unwrap();

        // Same signature, different uuid: the digest changes so the signer does too.
        let mut forged = request.clone();
        forged.uuid = new_uuid();
        let err = fx.client.create_game(OPERATOR, &forged).unwrap_err();
        assert!(matches!(
            registry_error(&err),
            Some(RegistryError::SignerMismatch { expected, .. }) if *expected == alice.address()
        ));
    }

    #[test]
    fn test_signature_for_other_domain_rejected() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let uuid = new_uuid();
        let deadline = fx.deadline();
        let struct_hash = create_struct_hash(&uuid, &alice.address(), "ipfs://game", deadline);

        let ours = fx.client.domain();
        let foreign = [
            Eip712Domain::new(ours.name.clone(), ours.version.clone(), ours.chain_id + 1, ours.verifying_contract),
            Eip712Domain::new(ours.name.clone(), ours.version.clone(), ours.chain_id, Address::repeat_byte(0x77)),
            Eip712Domain::new("OtherRegistry".to_string(), ours.version.clone(), ours.chain_id, ours.verifying_contract),
        ];

        for domain in foreign {
            let signature = alice.sign_digest(&domain.digest(&struct_hash)).unwrap();
            let mut request = fx
                .client
                .sign_create(&alice, &uuid, "ipfs://game", deadline)
                .unwrap();
            request.signature = signature.to_vec();

            let err = fx.client.create_game(OPERATOR, &request).unwrap_err();
            match registry_error(&err) {
                Some(RegistryError::SignerMismatch { expected, actual }) => {
                    assert_eq!(*expected, alice.address());
                    assert_ne!(*actual, alice.address());
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(fx.client.total_issued().unwrap(), 0);
    }

    #[test]
    fn test_high_s_twin_rejected() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let mut request = fx
            .client
            .sign_create(&alice, &new_uuid(), "ipfs://game", fx.deadline())
            .unwrap();
        let original = request.signature.clone();
        request.signature = malleate(&original);

        let err = fx.client.create_game(OPERATOR, &request).unwrap_err();
        assert_eq!(invalid_signer(&err), Some(&CryptoError::MalleableSignature));
        assert_eq!(err.kind(), ErrorKind::Consent);

        // The canonical form is still usable.
        request.signature = original;
        assert_eq!(fx.client.create_game(OPERATOR, &request).unwrap(), 1);
    }

    #[test]
    fn test_malformed_signatures_rejected() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let request = fx
            .client
            .sign_create(&alice, &new_uuid(), "ipfs://game", fx.deadline())
            .unwrap();

        let mut truncated = request.clone();
        truncated.signature.truncate(64);
        let err = fx.client.create_game(OPERATOR, &truncated).unwrap_err();
        assert_eq!(
            invalid_signer(&err),
            Some(&CryptoError::InvalidSignatureLength { expected: 65, actual: 64 })
        );

        let mut zeroed = request.clone();
        zeroed.signature = vec![0u8; 65];
        let err = fx.client.create_game(OPERATOR, &zeroed).unwrap_err();
        assert_eq!(invalid_signer(&err), Some(&CryptoError::InvalidSignatureFormat));

        let mut bad_v = request;
        bad_v.signature[64] = 29;
        let err = fx.client.create_game(OPERATOR, &bad_v).unwrap_err();
        assert_eq!(invalid_signer(&err), Some(&CryptoError::InvalidRecoveryId(29)));
    }

    #[test]
    fn test_operator_cannot_swap_signed_uri() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let (id, uuid) = fx.create_for(&alice, "ipfs://v1");

        let deadline = fx.deadline();
        let signature = fx.client.sign_update(&alice, &uuid, "ipfs://good", deadline).unwrap();
        let err = fx
            .client
            .update_uri_consented(OPERATOR, id, "ipfs://evil", deadline, &signature)
            .unwrap_err();
        assert!(matches!(
            registry_error(&err),
            Some(RegistryError::SignerMismatch { expected, .. }) if *expected == alice.address()
        ));
        assert_eq!(fx.client.uri(id).unwrap(), "ipfs://v1");
    }

    #[test]
    fn test_stale_consent_after_transfer() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();
        let (id, uuid) = fx.create_for(&alice, "ipfs://v1");

        let deadline = fx.deadline();
        let signature = fx.client.sign_update(&alice, &uuid, "ipfs://v2", deadline).unwrap();
        fx.client
            .transfer_asset(alice.address(), bob.address(), id)
            .unwrap();

        let err = fx
            .client
            .update_uri_consented(OPERATOR, id, "ipfs://v2", deadline, &signature)
            .unwrap_err();
        assert_eq!(
            registry_error(&err),
            Some(&RegistryError::SignerMismatch {
                expected: bob.address(),
                actual: alice.address(),
            })
        );

        let digest = fx
            .client
            .domain()
            .digest(&update_struct_hash(&uuid, "ipfs://v2", deadline));
        assert!(!fx.client.is_consumed(digest).unwrap());

        // Once alice holds the asset again her consent is live.
        fx.client
            .transfer_asset(bob.address(), alice.address(), id)
            .unwrap();
        fx.client
            .update_uri_consented(OPERATOR, id, "ipfs://v2", deadline, &signature)
            .unwrap();
        assert!(fx.client.is_consumed(digest).unwrap());
    }

    #[test]
    fn test_stranger_cannot_submit_valid_consent() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let request = fx
            .client
            .sign_create(&alice, &new_uuid(), "ipfs://game", fx.deadline())
            .unwrap();

        let err = fx.client.create_game(alice.address(), &request).unwrap_err();
        expect_registry_error(&err, &RegistryError::NotAuthorized { caller: alice.address() });
        let err = fx.client.create_game(STRANGER, &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }
}
