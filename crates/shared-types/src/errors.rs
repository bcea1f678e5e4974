//! # Error Taxonomy
//!
//! Every error enum in the workspace reports one of these categories through
//! a `kind()` method. Variants stay distinct per crate; the category lets
//! automated callers branch without matching every variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure categories shared by every crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Wrong caller role (not administrator, not owner, not operator).
    Authorization,
    /// Malformed or out-of-bound input.
    Validation,
    /// Input conflicts with existing state (duplicate, already initialized).
    StateConflict,
    /// Consent signature rejected (expired, reused, bad signer).
    Consent,
    /// No module handles the requested selector.
    Routing,
    /// Storage encoding or other internal fault.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization => write!(f, "Authorization"),
            Self::Validation => write!(f, "Validation"),
            Self::StateConflict => write!(f, "StateConflict"),
            Self::Consent => write!(f, "Consent"),
            Self::Routing => write!(f, "Routing"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}
