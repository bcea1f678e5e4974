//! Entry identity and registry limits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// UUID length enforced by default (canonical hyphenated form).
pub const DEFAULT_UUID_LENGTH: u32 = 36;

/// Maximum metadata URI length enforced by default.
pub const DEFAULT_MAX_URI_LENGTH: u32 = 2048;

/// Reference to an entry by external identifier or sequential id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryRef {
    /// Caller-supplied UUID.
    Uuid(String),
    /// Sequential id (never 0 for a live entry).
    Id(u64),
}

impl From<u64> for EntryRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for EntryRef {
    fn from(uuid: &str) -> Self {
        Self::Uuid(uuid.to_string())
    }
}

impl From<String> for EntryRef {
    fn from(uuid: String) -> Self {
        Self::Uuid(uuid)
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(uuid) => write!(f, "uuid {uuid}"),
            Self::Id(id) => write!(f, "id {id}"),
        }
    }
}

/// Input limits stored in the registry region at initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryLimits {
    /// Exact UUID length in bytes.
    pub uuid_length: u32,
    /// Maximum URI length in bytes.
    pub max_uri_length: u32,
}

impl Default for RegistryLimits {
    fn default() -> Self {
        Self {
            uuid_length: DEFAULT_UUID_LENGTH,
            max_uri_length: DEFAULT_MAX_URI_LENGTH,
        }
    }
}

/// A resolved registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Sequential id.
    pub id: u64,
    /// External identifier.
    pub uuid: String,
    /// Metadata URI.
    pub uri: String,
}
