//! # Call Context
//!
//! What a module sees while it runs: the original caller, the router's
//! address, block facts, the router's storage (through the call's
//! transaction) and a buffer for observations.
//!
//! A module executes "as" the router. `caller` is the account that called
//! the router, never the router itself.

use gr_01_namespaced_storage::SlotStore;
use shared_types::{Address, ChainContext, Observation};

/// Execution context of one delegated call.
pub struct CallContext<'a> {
    caller: Address,
    this: Address,
    chain: ChainContext,
    store: &'a mut dyn SlotStore,
    observations: &'a mut Vec<Observation>,
}

impl<'a> CallContext<'a> {
    /// Create a context over `store`, collecting observations into
    /// `observations`.
    pub fn new(
        caller: Address,
        this: Address,
        chain: ChainContext,
        store: &'a mut dyn SlotStore,
        observations: &'a mut Vec<Observation>,
    ) -> Self {
        Self {
            caller,
            this,
            chain,
            store,
            observations,
        }
    }

    /// Account that called the router.
    #[must_use]
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Router address (the verifying contract of consent domains).
    #[must_use]
    pub fn this(&self) -> Address {
        self.this
    }

    /// Block facts of this call.
    #[must_use]
    pub fn chain(&self) -> ChainContext {
        self.chain
    }

    /// Block timestamp in Unix seconds.
    #[must_use]
    pub fn block_timestamp(&self) -> u64 {
        self.chain.block_timestamp
    }

    /// Router storage, read-only.
    pub fn store(&self) -> &dyn SlotStore {
        &*self.store
    }

    /// Router storage.
    pub fn store_mut(&mut self) -> &mut dyn SlotStore {
        &mut *self.store
    }

    /// Record an observation. It is published only if the call commits.
    pub fn emit(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Observations recorded so far in this call.
    #[must_use]
    pub fn emitted(&self) -> &[Observation] {
        self.observations.as_slice()
    }
}
