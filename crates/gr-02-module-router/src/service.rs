//! # Module Router Service
//!
//! The single entry point. Every call:
//!
//! 1. takes the router's exclusive lock,
//! 2. opens a transaction over router storage,
//! 3. answers router-owned selectors itself or delegates into the routed
//!    module (then the fallback), preserving the original caller,
//! 4. commits storage and publishes observations only on success.
//!
//! Calls never interleave.

use crate::adapters::FacetDeployments;
use crate::codec::{decode_args, decode_output, encode_call, encode_output, split_selector};
use crate::domain::{
    admin_interface, apply_cuts, cut_interface, erc165_interface, loupe_interface, CallContext,
    RouterCall, RouterError, RouterLayout,
};
use crate::ports::Clock;
use gr_01_namespaced_storage::{InMemorySlotStore, SlotStore, Transaction};
use parking_lot::Mutex;
use registry_telemetry::{component_span, log_module_event};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Address, ChainContext, FacetCut, LogEntry, Observation, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "router";

struct RouterState {
    store: Box<dyn SlotStore>,
    logs: Vec<LogEntry>,
    block_number: u64,
}

/// Upgradeable single entry point.
pub struct ModuleRouter {
    address: Address,
    chain_id: u64,
    deployments: Arc<FacetDeployments>,
    clock: Arc<dyn Clock>,
    state: Mutex<RouterState>,
}

impl ModuleRouter {
    /// Create a router at `address` over fresh in-memory storage, with
    /// `admin` as the module-cut administrator.
    pub fn new(
        address: Address,
        admin: Address,
        chain_id: u64,
        deployments: Arc<FacetDeployments>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RouterError> {
        Self::with_store(
            address,
            admin,
            chain_id,
            deployments,
            clock,
            Box::new(InMemorySlotStore::new()),
        )
    }

    /// Create a router over an existing store.
    ///
    /// The administrator and the built-in interface ids are written
    /// immediately.
    pub fn with_store(
        address: Address,
        admin: Address,
        chain_id: u64,
        deployments: Arc<FacetDeployments>,
        clock: Arc<dyn Clock>,
        mut store: Box<dyn SlotStore>,
    ) -> Result<Self, RouterError> {
        if address.is_zero() || admin.is_zero() {
            return Err(RouterError::ZeroAddress);
        }

        RouterLayout::set_admin(store.as_mut(), admin)?;
        for id in [
            erc165_interface(),
            loupe_interface(),
            cut_interface(),
            admin_interface(),
        ] {
            RouterLayout::set_interface(store.as_mut(), id, true)?;
        }

        info!(
            component = COMPONENT,
            router = %address,
            admin = %admin,
            chain_id,
            "Router created"
        );

        Ok(Self {
            address,
            chain_id,
            deployments,
            clock,
            state: Mutex::new(RouterState {
                store,
                logs: Vec::new(),
                block_number: 0,
            }),
        })
    }

    /// Router address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Chain id bound into call contexts.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Module code table.
    #[must_use]
    pub fn deployments(&self) -> &Arc<FacetDeployments> {
        &self.deployments
    }

    /// Every observation published so far.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        self.state.lock().logs.clone()
    }

    /// Number of published observations.
    #[must_use]
    pub fn log_len(&self) -> usize {
        self.state.lock().logs.len()
    }

    /// Observations published at or after `index`.
    #[must_use]
    pub fn logs_since(&self, index: usize) -> Vec<LogEntry> {
        let state = self.state.lock();
        state.logs.get(index..).map(<[LogEntry]>::to_vec).unwrap_or_default()
    }

    /// Number of committed calls.
    #[must_use]
    pub fn block_number(&self) -> u64 {
        self.state.lock().block_number
    }

    // =========================================================================
    // ENTRY POINT
    // =========================================================================

    /// Execute raw calldata on behalf of `caller`.
    pub fn call(&self, caller: Address, calldata: &[u8]) -> Result<Vec<u8>, RouterError> {
        let (selector, args) = split_selector(calldata).ok_or(RouterError::MalformedCalldata {
            len: calldata.len(),
        })?;

        let mut state = self.state.lock();
        let chain = ChainContext {
            chain_id: self.chain_id,
            block_number: state.block_number + 1,
            block_timestamp: self.clock.now(),
        };

        let mut observations = Vec::new();
        let result = {
            let mut tx = Transaction::begin(state.store.as_mut());
            let output = {
                let mut ctx =
                    CallContext::new(caller, self.address, chain, &mut tx, &mut observations);
                self.dispatch(&mut ctx, selector, args)
            };
            match output {
                Ok(output) => {
                    let slots = tx.commit();
                    debug!(component = COMPONENT, selector = %selector, slots, "Call committed");
                    Ok(output)
                }
                Err(error) => {
                    tx.rollback();
                    Err(error)
                }
            }
        };

        match result {
            Ok(output) => {
                state.block_number = chain.block_number;
                for observation in observations {
                    debug!(
                        component = COMPONENT,
                        event = observation.name(),
                        block = chain.block_number,
                        "Observation published"
                    );
                    state.logs.push(LogEntry {
                        emitter: self.address,
                        block_number: chain.block_number,
                        observation,
                    });
                }
                Ok(output)
            }
            Err(error) => {
                warn!(
                    component = COMPONENT,
                    caller = %caller,
                    selector = %selector,
                    kind = %error.kind(),
                    error = %error,
                    "Call rejected"
                );
                Err(error)
            }
        }
    }

    /// Encode `args`, call `selector` and decode the result.
    pub fn call_typed<A, R>(&self, caller: Address, selector: Selector, args: &A) -> Result<R, RouterError>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let calldata =
            encode_call(selector, args).map_err(|e| RouterError::Codec(e.to_string()))?;
        let output = self.call(caller, &calldata)?;
        decode_output(&output).map_err(|e| RouterError::Codec(e.to_string()))
    }

    fn dispatch(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, RouterError> {
        if let Some(call) = RouterCall::from_selector(selector) {
            return self.handle_router_call(ctx, call, args);
        }
        if let Some(target) = RouterLayout::target_of(ctx.store(), selector)? {
            return self.delegate(ctx, target, selector, args);
        }
        match RouterLayout::fallback(ctx.store())? {
            Some(fallback) => self.delegate(ctx, fallback, selector, args),
            None => Err(RouterError::NoSuchFunction(selector)),
        }
    }

    fn delegate(
        &self,
        ctx: &mut CallContext<'_>,
        target: Address,
        selector: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, RouterError> {
        let module = self
            .deployments
            .get(&target)
            .ok_or(RouterError::TargetNotDeployed(target))?;
        debug!(
            component = COMPONENT,
            module = module.name(),
            target = %target,
            selector = %selector,
            "Delegating call"
        );
        Ok(module.execute(ctx, selector, args)?)
    }

    // =========================================================================
    // ROUTER-OWNED FUNCTIONS
    // =========================================================================

    fn handle_router_call(
        &self,
        ctx: &mut CallContext<'_>,
        call: RouterCall,
        args: &[u8],
    ) -> Result<Vec<u8>, RouterError> {
        let output = match call {
            RouterCall::ApplyModuleCuts => {
                let (cuts, init_target, init_data): (Vec<FacetCut>, Address, Vec<u8>) =
                    decode_args(args)?;
                self.apply_module_cuts_in(ctx, cuts, init_target, init_data)?;
                encode_output(&())?
            }
            RouterCall::Facets => {
                let store = ctx.store();
                let mut facets = Vec::new();
                for target in RouterLayout::target_addresses(store)? {
                    facets.push((target, RouterLayout::selectors_of(store, target)?));
                }
                encode_output(&facets)?
            }
            RouterCall::FacetFunctionSelectors => {
                let target: Address = decode_args(args)?;
                encode_output(&RouterLayout::selectors_of(ctx.store(), target)?)?
            }
            RouterCall::FacetAddresses => {
                encode_output(&RouterLayout::target_addresses(ctx.store())?)?
            }
            RouterCall::FacetAddress => {
                let selector: Selector = decode_args(args)?;
                encode_output(&RouterLayout::target_of(ctx.store(), selector)?)?
            }
            RouterCall::SupportsInterface => {
                let interface_id: Selector = decode_args(args)?;
                encode_output(&RouterLayout::supports_interface(ctx.store(), interface_id)?)?
            }
            RouterCall::Admin => encode_output(&RouterLayout::admin(ctx.store())?)?,
            RouterCall::TransferAdmin => {
                let new_admin: Address = decode_args(args)?;
                let previous = self.require_admin(ctx)?;
                if new_admin.is_zero() {
                    return Err(RouterError::ZeroAddress);
                }
                RouterLayout::set_admin(ctx.store_mut(), new_admin)?;
                ctx.emit(Observation::AdminTransferred {
                    previous,
                    new: new_admin,
                });
                info!(component = COMPONENT, previous = %previous, new = %new_admin, "Administrator transferred");
                encode_output(&())?
            }
            RouterCall::SetFallback => {
                let target: Address = decode_args(args)?;
                self.require_admin(ctx)?;
                if !target.is_zero() && !self.deployments.is_deployed(&target) {
                    return Err(RouterError::TargetNotDeployed(target));
                }
                RouterLayout::set_fallback(ctx.store_mut(), target)?;
                ctx.emit(Observation::FallbackUpdated { target });
                log_module_event!(info, COMPONENT, "Fallback updated", target);
                encode_output(&())?
            }
            RouterCall::FallbackTarget => encode_output(&RouterLayout::fallback(ctx.store())?)?,
        };
        Ok(output)
    }

    fn require_admin(&self, ctx: &CallContext<'_>) -> Result<Address, RouterError> {
        let admin = RouterLayout::admin(ctx.store())?;
        if ctx.caller() != admin {
            return Err(RouterError::NotAdmin {
                caller: ctx.caller(),
            });
        }
        Ok(admin)
    }

    fn apply_module_cuts_in(
        &self,
        ctx: &mut CallContext<'_>,
        cuts: Vec<FacetCut>,
        init_target: Address,
        init_data: Vec<u8>,
    ) -> Result<(), RouterError> {
        let _span = component_span!("apply_module_cuts", component = COMPONENT, cuts = cuts.len()).entered();
        self.require_admin(ctx)?;

        let deployments = &self.deployments;
        apply_cuts(ctx.store_mut(), &cuts, |address| deployments.is_deployed(address))?;

        if init_target.is_zero() {
            if !init_data.is_empty() {
                return Err(RouterError::InitDataWithoutTarget);
            }
        } else {
            let module = self
                .deployments
                .get(&init_target)
                .ok_or(RouterError::TargetNotDeployed(init_target))?;
            let (selector, args) = split_selector(&init_data).ok_or(
                RouterError::MalformedCalldata {
                    len: init_data.len(),
                },
            )?;
            module
                .execute(ctx, selector, args)
                .map_err(|source| RouterError::InitializationFailed {
                    target: init_target,
                    source,
                })?;
            log_module_event!(
                info,
                COMPONENT,
                "Initializer executed",
                init_target,
                initializer = module.name()
            );
        }

        for cut in &cuts {
            log_module_event!(
                info,
                COMPONENT,
                "Module cut applied",
                cut.target,
                action = ?cut.action,
                selectors = cut.selectors.len()
            );
        }
        ctx.emit(Observation::ModuleCut {
            cuts,
            init_target,
            init_data,
        });
        Ok(())
    }

    // =========================================================================
    // TYPED ACCESSORS
    // =========================================================================

    /// Apply module cuts as `caller`, then run the optional initializer.
    pub fn apply_module_cuts(
        &self,
        caller: Address,
        cuts: Vec<FacetCut>,
        init_target: Address,
        init_data: Vec<u8>,
    ) -> Result<(), RouterError> {
        self.call_typed(
            caller,
            RouterCall::ApplyModuleCuts.selector(),
            &(cuts, init_target, init_data),
        )
    }

    /// Every routed module with its selectors.
    pub fn facets(&self) -> Result<Vec<(Address, Vec<Selector>)>, RouterError> {
        self.call_typed(Address::ZERO, RouterCall::Facets.selector(), &())
    }

    /// Selectors routed to `target`.
    pub fn facet_selectors(&self, target: Address) -> Result<Vec<Selector>, RouterError> {
        self.call_typed(
            Address::ZERO,
            RouterCall::FacetFunctionSelectors.selector(),
            &target,
        )
    }

    /// Every routed module address.
    pub fn facet_addresses(&self) -> Result<Vec<Address>, RouterError> {
        self.call_typed(Address::ZERO, RouterCall::FacetAddresses.selector(), &())
    }

    /// Module routed for `selector`.
    pub fn facet_address(&self, selector: Selector) -> Result<Option<Address>, RouterError> {
        self.call_typed(Address::ZERO, RouterCall::FacetAddress.selector(), &selector)
    }

    /// True if `interface_id` is registered.
    pub fn supports_interface(&self, interface_id: Selector) -> Result<bool, RouterError> {
        self.call_typed(
            Address::ZERO,
            RouterCall::SupportsInterface.selector(),
            &interface_id,
        )
    }

    /// Current module-cut administrator.
    pub fn admin(&self) -> Result<Address, RouterError> {
        self.call_typed(Address::ZERO, RouterCall::Admin.selector(), &())
    }

    /// Hand the administrator role to `new_admin` (single step).
    pub fn transfer_admin(&self, caller: Address, new_admin: Address) -> Result<(), RouterError> {
        self.call_typed(caller, RouterCall::TransferAdmin.selector(), &new_admin)
    }

    /// Set (or clear with zero) the fallback module.
    pub fn set_fallback(&self, caller: Address, target: Address) -> Result<(), RouterError> {
        self.call_typed(caller, RouterCall::SetFallback.selector(), &target)
    }

    /// Configured fallback module.
    pub fn fallback_target(&self) -> Result<Option<Address>, RouterError> {
        self.call_typed(Address::ZERO, RouterCall::FallbackTarget.selector(), &())
    }
}
