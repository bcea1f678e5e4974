//! # Shared Types Crate
//!
//! This crate contains the value objects, cut wire types and observation
//! records used across the registry workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every type that crosses a crate boundary is
//!   defined here.
//! - **Caller Identity**: Facets never carry a caller field in their payloads;
//!   the router's call context is authoritative.
//! - **Failure Taxonomy**: Every error enum in the workspace maps onto
//!   [`ErrorKind`] so callers can branch on category.

pub mod entities;
pub mod errors;
pub mod events;

pub use entities::*;
pub use errors::*;
pub use events::*;
