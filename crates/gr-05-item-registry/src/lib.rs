//! # GR-05 Item Registry
//!
//! **Component:** 5
//!
//! ## Purpose
//!
//! Issues unique, transferable entries (published games) keyed by a
//! caller-supplied UUID and backed by a sequential id. Creation needs the
//! owner or an operator as caller plus the beneficiary's typed-data
//! consent; URI updates need the caller role plus either the current
//! holder's consent or nothing more.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Ids start at 1, strictly increase, never reused | `registry.rs` - `create()` |
//! | uuid ⇄ id is a bijection | `registry.rs` - `UuidAlreadyRegistered` check |
//! | Creation consent comes from the beneficiary | `registry.rs` - `SignerMismatch` |
//! | Update consent comes from the live holder | `registry.rs` - `AssetLedger::owner_of` at call time |
//! | Rejected calls never burn a signature | `registry.rs` - validations precede `ConsentVerifier::verify` |
//!
//! ## Layout
//!
//! ```text
//! domain/      entries, regions, typed-data structs, errors
//! ports/       AssetLedger
//! adapters/    NamespacedAssetLedger
//! registry.rs  ItemRegistry state machine
//! facets/      RegistryFacet, AssetFacet, RegistryInit
//! config.rs    RegistryConfig
//! deployment.rs RegistryDeployment, RegistryClient
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod deployment;
pub mod domain;
pub mod facets;
pub mod ports;
pub mod registry;

pub use adapters::NamespacedAssetLedger;
pub use config::{ConfigError, RegistryConfig};
pub use deployment::{DeployedFacets, RegistryClient, RegistryDeployment};
pub use domain::{
    create_struct_hash, update_struct_hash, AssetError, AssetLayout, Entry, EntryRef,
    RegistryError, RegistryLayout, RegistryLimits,
};
pub use facets::{asset_interface, registry_interface, AssetFacet, RegistryFacet, RegistryInit};
pub use ports::AssetLedger;
pub use registry::{CreateRequest, ItemRegistry};
