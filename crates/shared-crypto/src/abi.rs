//! # ABI Word Encoding
//!
//! Minimal static encoding for struct hash preimages: every value becomes one
//! big-endian 32-byte word. Dynamic values (strings, bytes) are hashed first,
//! as typed-data encoding requires.

use crate::hashing::keccak256;
use shared_types::{Address, Hash, U256};

/// Builder for a sequence of 32-byte words.
#[derive(Debug, Default, Clone)]
pub struct AbiEncoder {
    buf: Vec<u8>,
}

impl AbiEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw 32-byte word (type hashes, nested struct hashes).
    pub fn word(mut self, word: &Hash) -> Self {
        self.buf.extend_from_slice(&word.0);
        self
    }

    /// Append an address, left-padded to 32 bytes.
    pub fn address(mut self, address: &Address) -> Self {
        self.buf.extend_from_slice(&[0u8; 12]);
        self.buf.extend_from_slice(&address.0);
        self
    }

    /// Append an unsigned integer as a big-endian word.
    pub fn uint(mut self, value: U256) -> Self {
        let mut word = [0u8; 32];
        value.to_big_endian(&mut word);
        self.buf.extend_from_slice(&word);
        self
    }

    /// Append a `u64` as a `uint256` word.
    pub fn uint64(self, value: u64) -> Self {
        self.uint(U256::from(value))
    }

    /// Append a dynamic string by its Keccak-256 hash.
    pub fn string(self, value: &str) -> Self {
        let hash = keccak256(value.as_bytes());
        self.word(&hash)
    }

    /// Number of words written so far.
    pub fn len_words(&self) -> usize {
        self.buf.len() / 32
    }

    /// Encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Keccak-256 of the encoded bytes.
    pub fn hash(self) -> Hash {
        keccak256(&self.buf)
    }
}
