//! Domain layer: access region and errors.

pub mod errors;
pub mod layout;

pub use errors::OperatorError;
pub use layout::AccessLayout;
