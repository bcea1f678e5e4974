//! Adapters for the registry ports.

mod asset_ledger;

pub use asset_ledger::NamespacedAssetLedger;
