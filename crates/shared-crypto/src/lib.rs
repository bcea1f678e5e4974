//! # Shared Crypto - Registry Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Selectors, storage slots, struct hashes |
//! | `abi` | 32-byte word encoding | Struct hash preimages |
//! | `eip712` | Typed structured data | Domain-bound consent digests |
//! | `ecdsa` | secp256k1 | Recoverable consent signatures |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic signing, low-S enforcement (EIP-2)
//!   on recovery
//! - **Domain binding**: digests commit to name, version, chain id and the
//!   verifying router address

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod ecdsa;
pub mod eip712;
pub mod errors;
pub mod hashing;

// Re-exports
pub use abi::AbiEncoder;
pub use ecdsa::{recover_address, RecoverableSignature, Secp256k1KeyPair};
pub use eip712::{typed_data_digest, Eip712Domain};
pub use errors::CryptoError;
pub use hashing::{interface_id, keccak256, keccak256_many, selector};
