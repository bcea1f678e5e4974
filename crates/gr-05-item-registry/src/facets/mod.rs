//! Facets deployed behind the router.

pub mod asset;
pub mod init;
pub mod registry;

pub use asset::{asset_interface, AssetFacet};
pub use init::{RegistryInit, INIT_REGISTRY};
pub use registry::{registry_interface, RegistryFacet};
