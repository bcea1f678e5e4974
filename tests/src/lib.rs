//! # Game Registry Test Suite
//!
//! Cross-crate tests that drive a complete deployment through the router.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── fixtures.rs        # Deployment on a manual clock, well-known roles
//! ├── integration/
//! │   ├── flows.rs       # Creation, updates, authority, atomicity
//! │   ├── upgrades.rs    # Module cuts, initializers, loupe, fallback
//! │   └── regions.rs     # Storage region disjointness
//! └── exploits/
//!     └── consent.rs     # Replay, cross-domain, malleability, front-running
//! ```
//!
//! ## Running
//!
//! ```bash
//! cargo test -p gr-tests
//! cargo test -p gr-tests exploits
//! RUST_LOG=debug cargo test -p gr-tests flows -- --nocapture
//! ```

pub mod exploits;
pub mod fixtures;
pub mod integration;
