//! # Registry Configuration
//!
//! Deployment parameters. The limits are copied into the registry region
//! at initialization; the running facets read them from storage.

use crate::domain::{RegistryLimits, DEFAULT_MAX_URI_LENGTH, DEFAULT_UUID_LENGTH};
use serde::{Deserialize, Serialize};
use shared_crypto::Eip712Domain;
use shared_types::Address;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Consent domain name used when none is configured.
pub const DEFAULT_DOMAIN_NAME: &str = "GameRegistry";

/// Consent domain version used when none is configured.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Local development chain id.
pub const DEFAULT_CHAIN_ID: u64 = 31337;

/// Complete deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Consent domain name.
    pub domain_name: String,
    /// Consent domain version.
    pub domain_version: String,
    /// Exact UUID length.
    pub uuid_length: u32,
    /// Maximum URI length.
    pub max_uri_length: u32,
    /// Chain the router serves.
    pub chain_id: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            domain_name: DEFAULT_DOMAIN_NAME.to_string(),
            domain_version: DEFAULT_DOMAIN_VERSION.to_string(),
            uuid_length: DEFAULT_UUID_LENGTH,
            max_uri_length: DEFAULT_MAX_URI_LENGTH,
            chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

impl RegistryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GR_DOMAIN_NAME`: consent domain name (default: GameRegistry)
    /// - `GR_DOMAIN_VERSION`: consent domain version (default: 1)
    /// - `GR_UUID_LENGTH`: exact uuid length (default: 36)
    /// - `GR_MAX_URI_LENGTH`: maximum uri length (default: 2048)
    /// - `GR_CHAIN_ID`: chain id (default: 31337)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            domain_name: env::var("GR_DOMAIN_NAME").unwrap_or(defaults.domain_name),
            domain_version: env::var("GR_DOMAIN_VERSION").unwrap_or(defaults.domain_version),
            uuid_length: parse_var("GR_UUID_LENGTH")?.unwrap_or(defaults.uuid_length),
            max_uri_length: parse_var("GR_MAX_URI_LENGTH")?.unwrap_or(defaults.max_uri_length),
            chain_id: parse_var("GR_CHAIN_ID")?.unwrap_or(defaults.chain_id),
        })
    }

    /// Reject configurations no entry could satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domain_name.is_empty() {
            return Err(ConfigError::EmptyDomainName);
        }
        if self.uuid_length == 0 {
            return Err(ConfigError::ZeroLimit("uuid_length"));
        }
        if self.max_uri_length == 0 {
            return Err(ConfigError::ZeroLimit("max_uri_length"));
        }
        Ok(())
    }

    /// Limits written into the registry region.
    pub fn limits(&self) -> RegistryLimits {
        RegistryLimits {
            uuid_length: self.uuid_length,
            max_uri_length: self.max_uri_length,
        }
    }

    /// Consent domain of a router at `router`.
    pub fn domain(&self, router: Address) -> Eip712Domain {
        Eip712Domain::new(
            self.domain_name.clone(),
            self.domain_version.clone(),
            self.chain_id,
            router,
        )
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable did not parse.
    #[error("Invalid value {value:?} for {var}")]
    InvalidVar { var: &'static str, value: String },

    #[error("Consent domain name is empty")]
    EmptyDomainName,

    #[error("Limit {0} must be positive")]
    ZeroLimit(&'static str),
}

fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { var, value }),
        Err(_) => Ok(None),
    }
}
