//! Domain layer: router-owned functions, storage layout, cut rules, call
//! context and errors.

pub mod calls;
pub mod context;
pub mod cut;
pub mod errors;
pub mod layout;

pub use calls::{admin_interface, cut_interface, erc165_interface, loupe_interface, RouterCall};
pub use context::CallContext;
pub use cut::apply_cuts;
pub use errors::{FacetError, RouterError};
pub use layout::RouterLayout;
