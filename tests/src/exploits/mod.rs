//! Attack scenarios against consent-gated operations.

pub mod consent;
