//! Domain layer: region layout, recovered-signer capability and errors.

pub mod errors;
pub mod layout;

pub use errors::ConsentError;
pub use layout::ConsentLayout;

use shared_types::{Address, Hash};

/// Proof that a fresh, in-deadline consent signature was consumed.
///
/// Only [`crate::ConsentVerifier::verify`] produces one. The caller still
/// decides whether the signer is the right principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveredSigner {
    address: Address,
    digest: Hash,
}

impl RecoveredSigner {
    pub(crate) fn new(address: Address, digest: Hash) -> Self {
        Self { address, digest }
    }

    /// Recovered signer address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Digest that was consumed.
    #[must_use]
    pub fn digest(&self) -> Hash {
        self.digest
    }

    /// True if the signer is `expected`.
    #[must_use]
    pub fn is(&self, expected: &Address) -> bool {
        self.address == *expected
    }
}
