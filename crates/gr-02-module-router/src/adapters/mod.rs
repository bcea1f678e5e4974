//! Adapters: clocks and the module code table.

pub mod clock;
pub mod deployments;

pub use clock::{ManualClock, SystemClock};
pub use deployments::FacetDeployments;
