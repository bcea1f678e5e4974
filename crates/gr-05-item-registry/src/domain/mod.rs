//! Domain layer: entries, regions, typed-data structs and errors.

pub mod entry;
pub mod errors;
pub mod layout;
pub mod typed_data;

pub use entry::{Entry, EntryRef, RegistryLimits, DEFAULT_MAX_URI_LENGTH, DEFAULT_UUID_LENGTH};
pub use errors::{AssetError, RegistryError};
pub use layout::{AssetLayout, RegistryLayout};
pub use typed_data::{create_struct_hash, update_struct_hash, CREATE_GAME_TYPE, UPDATE_GAME_URI_TYPE};
