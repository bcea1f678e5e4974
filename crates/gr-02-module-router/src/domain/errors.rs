//! # Error Types
//!
//! `RouterError` is what callers of the router see. Facet failures travel
//! inside it as `FacetError`; module crates convert their own error enums
//! into `FacetError::Module` so the router never depends on them.

use gr_01_namespaced_storage::StorageError;
use shared_types::{Address, ErrorKind, Selector};
use std::error::Error as StdError;
use thiserror::Error;

// =============================================================================
// FACET ERRORS
// =============================================================================

/// Failure inside a facet.
#[derive(Debug, Error)]
pub enum FacetError {
    /// Arguments or return data did not decode.
    #[error("Malformed call payload: {0}")]
    Decode(String),

    /// A value could not be encoded.
    #[error("Failed to encode payload: {0}")]
    Encode(String),

    /// The selector was routed to a facet that does not implement it.
    #[error("Selector {0} not handled by this module")]
    UnhandledSelector(Selector),

    /// Slot encoding failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A module-specific error, categorized.
    #[error("{source}")]
    Module {
        /// Failure category.
        kind: ErrorKind,
        /// The module's own error value.
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl FacetError {
    /// Wrap a module error.
    pub fn module<E>(kind: ErrorKind, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Module {
            kind,
            source: Box::new(error),
        }
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) | Self::Encode(_) => ErrorKind::Validation,
            Self::UnhandledSelector(_) => ErrorKind::Routing,
            Self::Storage(e) => e.kind(),
            Self::Module { kind, .. } => *kind,
        }
    }

    /// The wrapped module error, if it is an `E`.
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Module { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

// =============================================================================
// ROUTER ERRORS
// =============================================================================

/// Errors surfaced by [`crate::ModuleRouter`].
#[derive(Debug, Error)]
pub enum RouterError {
    /// Calldata shorter than a selector.
    #[error("Malformed calldata: {len} bytes, need at least 4")]
    MalformedCalldata { len: usize },

    /// Caller is not the module-cut administrator.
    #[error("Caller {caller:?} is not the administrator")]
    NotAdmin { caller: Address },

    /// Null address where a real one is required.
    #[error("Zero address not allowed")]
    ZeroAddress,

    /// A cut carried no selectors.
    #[error("Cut {index} has an empty selector list")]
    EmptySelectorList { index: usize },

    /// `Add` for a selector that is already routed.
    #[error("Selector {selector} already mapped to {target:?}")]
    SelectorAlreadyMapped { selector: Selector, target: Address },

    /// `Replace` or `Remove` for a selector that is not routed.
    #[error("Selector {0} is not mapped")]
    SelectorNotMapped(Selector),

    /// `Replace` onto the module that already handles the selector.
    #[error("Selector {selector} already routed to {target:?}")]
    ReplaceWithSameTarget { selector: Selector, target: Address },

    /// `Remove` with a non-null target.
    #[error("Remove cut must target the zero address, got {0:?}")]
    RemoveTargetNotZero(Address),

    /// Attempt to route one of the router's own selectors.
    #[error("Selector {0} belongs to the router and cannot be cut")]
    ImmutableSelector(Selector),

    /// No module deployed at the address.
    #[error("No module deployed at {0:?}")]
    TargetNotDeployed(Address),

    /// Initializer data given without an initializer.
    #[error("Initializer data supplied without an initializer target")]
    InitDataWithoutTarget,

    /// The post-cut initializer failed; the whole batch was rolled back.
    #[error("Initializer {target:?} failed: {source}")]
    InitializationFailed {
        target: Address,
        #[source]
        source: FacetError,
    },

    /// Nothing handles the selector and no fallback is configured.
    #[error("No function for selector {0}")]
    NoSuchFunction(Selector),

    /// Address already holds a module.
    #[error("Address {0:?} already holds a module")]
    AddressInUse(Address),

    /// Failure inside the dispatched module.
    #[error(transparent)]
    Facet(#[from] FacetError),

    /// Router storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Call arguments or return data could not be (de)serialized.
    #[error("Codec error: {0}")]
    Codec(String),
}

impl RouterError {
    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAdmin { .. } => ErrorKind::Authorization,
            Self::MalformedCalldata { .. }
            | Self::ZeroAddress
            | Self::EmptySelectorList { .. }
            | Self::RemoveTargetNotZero(_)
            | Self::ImmutableSelector(_)
            | Self::TargetNotDeployed(_)
            | Self::InitDataWithoutTarget
            | Self::Codec(_) => ErrorKind::Validation,
            Self::SelectorAlreadyMapped { .. }
            | Self::SelectorNotMapped(_)
            | Self::ReplaceWithSameTarget { .. }
            | Self::AddressInUse(_) => ErrorKind::StateConflict,
            Self::NoSuchFunction(_) => ErrorKind::Routing,
            Self::InitializationFailed { source, .. } | Self::Facet(source) => source.kind(),
            Self::Storage(e) => e.kind(),
        }
    }

    /// The module error behind this failure, if it is an `E`.
    ///
    /// Looks through both direct dispatch failures and failed initializers.
    #[must_use]
    pub fn module_error<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Facet(inner) | Self::InitializationFailed { source: inner, .. } => {
                inner.downcast_ref::<E>()
            }
            _ => None,
        }
    }
}
