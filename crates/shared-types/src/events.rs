//! # Observations
//!
//! Append-only records emitted by facets for external indexers. Nothing in
//! the workspace consumes them; the router keeps them in its log once the
//! emitting call commits and drops them when the call fails.

use crate::entities::{Address, FacetCut, Hash};
use serde::{Deserialize, Serialize};

/// A single externally observable event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    /// A batch of module cuts was applied.
    ModuleCut {
        /// Cuts in application order.
        cuts: Vec<FacetCut>,
        /// Post-cut initializer, zero when none ran.
        init_target: Address,
        /// Calldata forwarded to the initializer.
        init_data: Vec<u8>,
    },
    /// The module-cut administrator changed.
    AdminTransferred {
        /// Previous administrator.
        previous: Address,
        /// New administrator.
        new: Address,
    },
    /// The fallback target changed (zero clears it).
    FallbackUpdated {
        /// New fallback target.
        target: Address,
    },
    /// The owner nominated a successor.
    OwnershipTransferStarted {
        /// Current owner.
        previous: Address,
        /// Pending owner.
        new: Address,
    },
    /// The pending owner accepted ownership.
    OwnershipTransferred {
        /// Previous owner (zero on initialization).
        previous: Address,
        /// New owner.
        new: Address,
    },
    /// An operator was granted standing authorization.
    OperatorAdded {
        /// The operator.
        operator: Address,
    },
    /// An operator lost standing authorization.
    OperatorRemoved {
        /// The operator.
        operator: Address,
    },
    /// A registry entry was created.
    EntryCreated {
        /// Sequential id.
        id: u64,
        /// External identifier.
        uuid: String,
        /// Initial asset holder.
        beneficiary: Address,
        /// Metadata URI.
        uri: String,
    },
    /// A registry entry's URI was overwritten.
    EntryUriUpdated {
        /// Sequential id.
        id: u64,
        /// External identifier.
        uuid: String,
        /// New metadata URI.
        new_uri: String,
    },
    /// A consent digest was consumed.
    ConsentConsumed {
        /// Fully domain-bound digest.
        digest: Hash,
        /// Recovered signer.
        signer: Address,
    },
    /// The asset backing an entry changed holder.
    AssetTransferred {
        /// Previous holder, zero on mint.
        from: Address,
        /// New holder.
        to: Address,
        /// Sequential id of the entry.
        id: u64,
    },
}

impl Observation {
    /// Short event name for logs and indexers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ModuleCut { .. } => "ModuleCut",
            Self::AdminTransferred { .. } => "AdminTransferred",
            Self::FallbackUpdated { .. } => "FallbackUpdated",
            Self::OwnershipTransferStarted { .. } => "OwnershipTransferStarted",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::OperatorAdded { .. } => "OperatorAdded",
            Self::OperatorRemoved { .. } => "OperatorRemoved",
            Self::EntryCreated { .. } => "EntryCreated",
            Self::EntryUriUpdated { .. } => "EntryUriUpdated",
            Self::ConsentConsumed { .. } => "ConsentConsumed",
            Self::AssetTransferred { .. } => "AssetTransferred",
        }
    }
}

/// An observation as recorded in the router's log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Router that emitted the observation.
    pub emitter: Address,
    /// Block the emitting call committed in.
    pub block_number: u64,
    /// The observation itself.
    pub observation: Observation,
}
