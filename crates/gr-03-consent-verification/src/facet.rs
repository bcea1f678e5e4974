//! # Consent Facet
//!
//! Read-only surface for off-system signers and auditors.
//!
//! | Function | Returns |
//! |----------|---------|
//! | `domainSeparator()` | `Hash` |
//! | `eip712Domain()` | `(name, version, chain_id, verifying_contract)` |
//! | `isConsumed(bytes32)` | `bool` |

use crate::verifier::ConsentVerifier;
use gr_02_module_router::{decode_args, encode_output, CallContext, Facet, FacetError};
use shared_crypto::selector;
use shared_types::{Hash, Selector};

/// Canonical signatures of the consent functions.
pub mod signatures {
    /// `domainSeparator()`
    pub const DOMAIN_SEPARATOR: &str = "domainSeparator()";
    /// `eip712Domain()`
    pub const EIP712_DOMAIN: &str = "eip712Domain()";
    /// `isConsumed(bytes32)`
    pub const IS_CONSUMED: &str = "isConsumed(bytes32)";
}

/// Read-only consent module.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsentFacet;

impl Facet for ConsentFacet {
    fn name(&self) -> &'static str {
        "consent"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            selector(signatures::DOMAIN_SEPARATOR),
            selector(signatures::EIP712_DOMAIN),
            selector(signatures::IS_CONSUMED),
        ]
    }

    fn execute(
        &self,
        ctx: &mut CallContext<'_>,
        sel: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, FacetError> {
        if sel == selector(signatures::DOMAIN_SEPARATOR) {
            encode_output(&ConsentVerifier::domain_separator(ctx)?)
        } else if sel == selector(signatures::EIP712_DOMAIN) {
            let domain = ConsentVerifier::domain(ctx)?;
            encode_output(&(
                domain.name,
                domain.version,
                domain.chain_id,
                domain.verifying_contract,
            ))
        } else if sel == selector(signatures::IS_CONSUMED) {
            let digest: Hash = decode_args(args)?;
            encode_output(&ConsentVerifier::is_consumed(ctx.store(), &digest)?)
        } else {
            Err(FacetError::UnhandledSelector(sel))
        }
    }
}
