//! # GR-03 Consent Verification
//!
//! **Component:** 3
//!
//! ## Purpose
//!
//! Replay-safe, deadline-bound, domain-scoped verification of typed-data
//! consent signatures. Consent-gated operations hand a struct hash, a
//! deadline and a 65-byte signature to [`ConsentVerifier::verify`] and get
//! back the recovered signer; matching it against the expected principal is
//! the caller's job.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | A digest is consumed at most once | `verifier.rs` - replay check before recovery |
//! | Consumed digests are never forgotten | `domain/layout.rs` - no removal path |
//! | Signatures bind name, version, chain and router | `verifier.rs` - `domain()` |
//! | Block time past the deadline always fails | `verifier.rs` - checked first |
//! | Only low-s signatures recover | `shared_crypto::recover_address` |

#![warn(clippy::all)]

pub mod domain;
pub mod facet;
pub mod verifier;

pub use domain::{ConsentError, ConsentLayout, RecoveredSigner};
pub use facet::ConsentFacet;
pub use verifier::ConsentVerifier;
