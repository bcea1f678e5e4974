use gr_01_namespaced_storage::StorageError;
use gr_02_module_router::FacetError;
use shared_types::{Address, ErrorKind};
use thiserror::Error;

/// Owner and operator management failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperatorError {
    #[error("Caller {caller:?} is not the owner")]
    NotOwner { caller: Address },

    #[error("Caller {caller:?} is not the pending owner")]
    NotPendingOwner { caller: Address },

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("Operator {0:?} already exists")]
    OperatorAlreadyExists(Address),

    #[error("Operator {0:?} not found")]
    OperatorNotFound(Address),

    #[error("Owner already initialized")]
    AlreadyInitialized,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl OperatorError {
    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner { .. } | Self::NotPendingOwner { .. } => ErrorKind::Authorization,
            Self::ZeroAddress => ErrorKind::Validation,
            Self::OperatorAlreadyExists(_)
            | Self::OperatorNotFound(_)
            | Self::AlreadyInitialized => ErrorKind::StateConflict,
            Self::Storage(e) => e.kind(),
        }
    }
}

impl From<OperatorError> for FacetError {
    fn from(error: OperatorError) -> Self {
        FacetError::module(error.kind(), error)
    }
}
