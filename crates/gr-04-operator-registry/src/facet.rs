//! # Operator Facet
//!
//! | Function | Gate |
//! |----------|------|
//! | `addOperator(address)` | owner |
//! | `removeOperator(address)` | owner |
//! | `isOperator(address)` | none |
//! | `getOperators()` | none |
//! | `owner()` | none |
//! | `pendingOwner()` | none |
//! | `transferOwnership(address)` | owner |
//! | `acceptOwnership()` | pending owner |

use crate::access::AccessControl;
use gr_02_module_router::{decode_args, encode_output, CallContext, Facet, FacetError};
use shared_crypto::{interface_id, selector};
use shared_types::{Address, Selector};

/// Canonical signatures of the operator functions.
pub mod signatures {
    /// `addOperator(address)`
    pub const ADD_OPERATOR: &str = "addOperator(address)";
    /// `removeOperator(address)`
    pub const REMOVE_OPERATOR: &str = "removeOperator(address)";
    /// `isOperator(address)`
    pub const IS_OPERATOR: &str = "isOperator(address)";
    /// `getOperators()`
    pub const GET_OPERATORS: &str = "getOperators()";
    /// `owner()`
    pub const OWNER: &str = "owner()";
    /// `pendingOwner()`
    pub const PENDING_OWNER: &str = "pendingOwner()";
    /// `transferOwnership(address)`
    pub const TRANSFER_OWNERSHIP: &str = "transferOwnership(address)";
    /// `acceptOwnership()`
    pub const ACCEPT_OWNERSHIP: &str = "acceptOwnership()";
}

/// Two-step ownership interface id.
#[must_use]
pub fn ownership_interface() -> Selector {
    interface_id(&[
        signatures::OWNER,
        signatures::PENDING_OWNER,
        signatures::TRANSFER_OWNERSHIP,
        signatures::ACCEPT_OWNERSHIP,
    ])
}

/// Operator management interface id.
#[must_use]
pub fn operator_interface() -> Selector {
    interface_id(&[
        signatures::ADD_OPERATOR,
        signatures::REMOVE_OPERATOR,
        signatures::IS_OPERATOR,
        signatures::GET_OPERATORS,
    ])
}

/// Owner and operator management module.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperatorFacet;

impl Facet for OperatorFacet {
    fn name(&self) -> &'static str {
        "operators"
    }

    fn selectors(&self) -> Vec<Selector> {
        [
            signatures::ADD_OPERATOR,
            signatures::REMOVE_OPERATOR,
            signatures::IS_OPERATOR,
            signatures::GET_OPERATORS,
            signatures::OWNER,
            signatures::PENDING_OWNER,
            signatures::TRANSFER_OWNERSHIP,
            signatures::ACCEPT_OWNERSHIP,
        ]
        .into_iter()
        .map(selector)
        .collect()
    }

    fn execute(
        &self,
        ctx: &mut CallContext<'_>,
        sel: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, FacetError> {
        if sel == selector(signatures::ADD_OPERATOR) {
            let operator: Address = decode_args(args)?;
            AccessControl::add_operator(ctx, operator)?;
            encode_output(&())
        } else if sel == selector(signatures::REMOVE_OPERATOR) {
            let operator: Address = decode_args(args)?;
            AccessControl::remove_operator(ctx, operator)?;
            encode_output(&())
        } else if sel == selector(signatures::IS_OPERATOR) {
            let account: Address = decode_args(args)?;
            encode_output(&AccessControl::is_operator(ctx.store(), &account)?)
        } else if sel == selector(signatures::GET_OPERATORS) {
            encode_output(&AccessControl::operators(ctx.store())?)
        } else if sel == selector(signatures::OWNER) {
            encode_output(&AccessControl::owner(ctx.store())?)
        } else if sel == selector(signatures::PENDING_OWNER) {
            encode_output(&AccessControl::pending_owner(ctx.store())?)
        } else if sel == selector(signatures::TRANSFER_OWNERSHIP) {
            let new_owner: Address = decode_args(args)?;
            AccessControl::transfer_ownership(ctx, new_owner)?;
            encode_output(&())
        } else if sel == selector(signatures::ACCEPT_OWNERSHIP) {
            AccessControl::accept_ownership(ctx)?;
            encode_output(&())
        } else {
            Err(FacetError::UnhandledSelector(sel))
        }
    }
}
