//! # GR-04 Operator Registry
//!
//! **Component:** 4
//!
//! ## Purpose
//!
//! A single controlling owner designates a small set of operators with
//! standing authorization over registry operations. Other modules consult
//! [`AccessControl::is_owner_or_operator`].
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | No duplicate operators | `access.rs` - `add_operator()` |
//! | Zero address is never an operator | `access.rs` - `add_operator()` |
//! | Only the owner changes the set | `access.rs` - `require_owner()` first |
//! | Ownership needs nomination and acceptance | `access.rs` - `transfer_ownership()`, `accept_ownership()` |

#![warn(clippy::all)]

pub mod access;
pub mod domain;
pub mod facet;

pub use access::AccessControl;
pub use domain::{AccessLayout, OperatorError};
pub use facet::{operator_interface, ownership_interface, OperatorFacet};
