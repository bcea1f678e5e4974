//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature byte length is not 65 (r || s || v).
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// R or S outside [1, n-1], or otherwise not a valid signature encoding.
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// S in the upper half of the curve order (EIP-2)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Recovery id is not 0, 1, 27 or 28
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,
}
