//! End-to-end scenarios against a fully deployed registry.

pub mod flows;
pub mod regions;
pub mod upgrades;
