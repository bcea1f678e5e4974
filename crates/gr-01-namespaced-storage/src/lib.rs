//! # GR-01 Namespaced Storage
//!
//! **Component:** 1 (leaf)
//!
//! ## Purpose
//!
//! Every module shares the router's single key/value space. Each keeps its
//! private state in a region whose base slot is a pure function of a unique
//! tag, so modules can be added and replaced without disturbing each other's
//! durable state.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Region base depends only on the tag | `domain/slot.rs` - `region_for()` |
//! | Regions own 256 aligned field slots | `domain/slot.rs` - low byte cleared |
//! | Declared regions are pairwise disjoint | `domain/region.rs` - `RegionRegistry::verify_disjoint()` |
//! | Failed calls leave no trace | `transaction.rs` - drop discards the overlay |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Slots | `domain/slot.rs` | Region, field, mapping and array slot derivation |
//! | Regions | `domain/region.rs` | `Region` trait and registry |
//! | Store port | `ports/mod.rs` | `SlotStore` |
//! | Memory adapter | `adapters/mod.rs` | `InMemorySlotStore` |
//! | Overlay | `transaction.rs` | Journaled write set |
//! | Handles | `handles.rs` | `Field`, `Mapping`, `SlotVec`, `EnumerableSet` |

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod handles;
pub mod ports;
pub mod transaction;

pub use adapters::InMemorySlotStore;
pub use domain::{region_for, Region, RegionRegistry, StorageError, StorageSlot};
pub use handles::{EnumerableSet, Field, Mapping, SlotVec};
pub use ports::SlotStore;
pub use transaction::Transaction;
