use crate::config::ConfigError;
use crate::domain::EntryRef;
use gr_01_namespaced_storage::StorageError;
use gr_02_module_router::FacetError;
use gr_03_consent_verification::ConsentError;
use gr_04_operator_registry::OperatorError;
use shared_types::{Address, ErrorKind};
use thiserror::Error;

/// Item registry failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller is neither the owner nor an operator.
    #[error("Caller {caller:?} is not the owner or an operator")]
    NotAuthorized { caller: Address },

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("UUID is empty")]
    EmptyUuid,

    #[error("UUID length {actual}, expected {expected}")]
    InvalidUuidLength { expected: u32, actual: usize },

    #[error("UUID {0} is already registered")]
    UuidAlreadyRegistered(String),

    #[error("URI is empty")]
    EmptyUri,

    #[error("URI length {actual} exceeds {max}")]
    UriTooLong { max: u32, actual: usize },

    /// The id counter wrapped.
    #[error("Entry id space exhausted")]
    IdOverflow,

    /// The consent was signed by someone other than the required principal.
    #[error("Consent signed by {actual:?}, expected {expected:?}")]
    SignerMismatch { expected: Address, actual: Address },

    #[error("No entry for {0}")]
    EntryNotFound(EntryRef),

    #[error("Registry already initialized")]
    AlreadyInitialized,

    #[error("Registry not initialized")]
    NotInitialized,

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Consent(#[from] ConsentError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RegistryError {
    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthorized { .. } => ErrorKind::Authorization,
            Self::ZeroAddress
            | Self::EmptyUuid
            | Self::InvalidUuidLength { .. }
            | Self::EmptyUri
            | Self::UriTooLong { .. }
            | Self::Config(_) => ErrorKind::Validation,
            Self::UuidAlreadyRegistered(_)
            | Self::IdOverflow
            | Self::EntryNotFound(_)
            | Self::AlreadyInitialized => ErrorKind::StateConflict,
            Self::SignerMismatch { .. } => ErrorKind::Consent,
            Self::NotInitialized => ErrorKind::Internal,
            Self::Consent(e) => e.kind(),
            Self::Asset(e) => e.kind(),
            Self::Operator(e) => e.kind(),
            Self::Storage(e) => e.kind(),
        }
    }
}

impl From<RegistryError> for FacetError {
    fn from(error: RegistryError) -> Self {
        FacetError::module(error.kind(), error)
    }
}

/// Asset ledger failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    /// Mint or transfer to the zero address.
    #[error("Invalid recipient {0:?}")]
    InvalidRecipient(Address),

    #[error("Asset {0} already minted")]
    AlreadyMinted(u64),

    #[error("Asset {0} does not exist")]
    NonexistentAsset(u64),

    /// `from` does not hold the asset, or the caller is not `from`.
    #[error("{caller:?} cannot move asset {id}")]
    NotHolder { caller: Address, id: u64 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AssetError {
    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRecipient(_) => ErrorKind::Validation,
            Self::AlreadyMinted(_) | Self::NonexistentAsset(_) => ErrorKind::StateConflict,
            Self::NotHolder { .. } => ErrorKind::Authorization,
            Self::Storage(e) => e.kind(),
        }
    }
}

impl From<AssetError> for FacetError {
    fn from(error: AssetError) -> Self {
        FacetError::module(error.kind(), error)
    }
}
