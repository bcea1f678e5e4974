//! # Typed Structured Data (EIP-712)
//!
//! A consent digest binds a struct hash to a domain:
//!
//! ```text
//! domain_separator = keccak256(DOMAIN_TYPEHASH ‖ keccak(name) ‖ keccak(version)
//!                              ‖ chainId ‖ verifyingContract)
//! digest           = keccak256(0x19 ‖ 0x01 ‖ domain_separator ‖ struct_hash)
//! ```
//!
//! Off-system signers must reproduce exactly this binding or the recovered
//! signer will not match.

use crate::abi::AbiEncoder;
use crate::hashing::{keccak256, keccak256_many};
use shared_types::{Address, Hash};

/// Canonical type string of the domain struct.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Keccak-256 of a type string.
pub fn type_hash(type_string: &str) -> Hash {
    keccak256(type_string.as_bytes())
}

/// Signing domain of one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    /// Protocol name.
    pub name: String,
    /// Protocol version.
    pub version: String,
    /// Chain the deployment lives on.
    pub chain_id: u64,
    /// Router address (the verifying contract).
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Create a domain.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// Domain separator.
    pub fn separator(&self) -> Hash {
        AbiEncoder::new()
            .word(&type_hash(DOMAIN_TYPE))
            .string(&self.name)
            .string(&self.version)
            .uint64(self.chain_id)
            .address(&self.verifying_contract)
            .hash()
    }

    /// Digest of `struct_hash` under this domain.
    pub fn digest(&self, struct_hash: &Hash) -> Hash {
        typed_data_digest(&self.separator(), struct_hash)
    }
}

/// `keccak256(0x19 0x01 ‖ domain_separator ‖ struct_hash)`.
pub fn typed_data_digest(domain_separator: &Hash, struct_hash: &Hash) -> Hash {
    keccak256_many(&[&[0x19, 0x01], &domain_separator.0, &struct_hash.0])
}
