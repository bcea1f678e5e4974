//! Typed-data structs signed by beneficiaries and holders.
//!
//! ```text
//! CreateGame(string uuid,address beneficiary,string uri,uint256 deadline)
//! UpdateGameUri(string uuid,string newUri,uint256 deadline)
//! ```

use shared_crypto::{eip712::type_hash, AbiEncoder};
use shared_types::{Address, Hash};

/// Type string of the creation consent.
pub const CREATE_GAME_TYPE: &str =
    "CreateGame(string uuid,address beneficiary,string uri,uint256 deadline)";

/// Type string of the URI update consent.
pub const UPDATE_GAME_URI_TYPE: &str = "UpdateGameUri(string uuid,string newUri,uint256 deadline)";

/// Struct hash of a `CreateGame` consent.
#[must_use]
pub fn create_struct_hash(uuid: &str, beneficiary: &Address, uri: &str, deadline: u64) -> Hash {
    AbiEncoder::new()
        .word(&type_hash(CREATE_GAME_TYPE))
        .string(uuid)
        .address(beneficiary)
        .string(uri)
        .uint64(deadline)
        .hash()
}

/// Struct hash of an `UpdateGameUri` consent.
#[must_use]
pub fn update_struct_hash(uuid: &str, new_uri: &str, deadline: u64) -> Hash {
    AbiEncoder::new()
        .word(&type_hash(UPDATE_GAME_URI_TYPE))
        .string(uuid)
        .string(new_uri)
        .uint64(deadline)
        .hash()
}
