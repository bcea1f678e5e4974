//! # Keccak-256 Hashing
//!
//! The one hash function of the registry: selectors, storage slots, struct
//! hashes and typed-data digests are all Keccak-256.

use sha3::{Digest, Keccak256};
use shared_types::{Hash, Selector};

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash(hasher.finalize().into())
}

/// Hash the concatenation of multiple inputs.
pub fn keccak256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for input in inputs {
        hasher.update(input);
    }
    Hash(hasher.finalize().into())
}

/// Function selector: first four bytes of `keccak256(signature)`.
///
/// `signature` is the canonical form, e.g. `"isOperator(address)"`.
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector([hash.0[0], hash.0[1], hash.0[2], hash.0[3]])
}

/// Interface identifier (ERC-165): XOR of the selectors of every signature.
pub fn interface_id(signatures: &[&str]) -> Selector {
    signatures
        .iter()
        .map(|s| selector(s))
        .fold(Selector::default(), Selector::xor)
}
