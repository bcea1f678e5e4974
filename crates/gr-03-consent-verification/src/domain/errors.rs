use gr_01_namespaced_storage::StorageError;
use gr_02_module_router::FacetError;
use shared_crypto::CryptoError;
use shared_types::{ErrorKind, Hash};
use thiserror::Error;

/// Consent verification failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsentError {
    /// Block time is past the signed deadline.
    #[error("Consent expired: deadline {deadline}, block time {now}")]
    ConsentExpired { deadline: u64, now: u64 },

    /// The digest was consumed by an earlier call.
    #[error("Consent already used: {0:?}")]
    ConsentAlreadyUsed(Hash),

    /// The signature is malformed or recovers to no address.
    #[error("Invalid signer: {0}")]
    InvalidSigner(#[source] CryptoError),

    /// The signing domain was never initialized.
    #[error("Consent domain not initialized")]
    NotInitialized,

    /// The signing domain is already initialized.
    #[error("Consent domain already initialized")]
    AlreadyInitialized,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ConsentError {
    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConsentExpired { .. } | Self::ConsentAlreadyUsed(_) | Self::InvalidSigner(_) => {
                ErrorKind::Consent
            }
            Self::AlreadyInitialized => ErrorKind::StateConflict,
            Self::NotInitialized => ErrorKind::Internal,
            Self::Storage(e) => e.kind(),
        }
    }
}

impl From<ConsentError> for FacetError {
    fn from(error: ConsentError) -> Self {
        FacetError::module(error.kind(), error)
    }
}
