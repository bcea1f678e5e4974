//! Shared deployment fixture for the suite.

use gr_02_module_router::{Clock, ManualClock, RouterError};
use gr_05_item_registry::{RegistryClient, RegistryConfig, RegistryDeployment, RegistryError};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Address, ErrorKind, Observation};
use std::sync::Arc;

/// Module-cut administrator.
pub const ADMIN: Address = Address::repeat_byte(0xAD);
/// Business owner.
pub const OWNER: Address = Address::repeat_byte(0x0A);
/// Operator added by [`Fixture::new`].
pub const OPERATOR: Address = Address::repeat_byte(0x0B);
/// Holds no role.
pub const STRANGER: Address = Address::repeat_byte(0x5E);

/// Block time the fixture starts at.
pub const START_TIME: u64 = 1_700_000_000;

/// One hour, the default consent window.
pub const WINDOW: u64 = 3_600;

/// A deployed registry on a manual clock with one operator.
pub struct Fixture {
    pub client: RegistryClient,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        registry_telemetry::init_test_telemetry();
        let clock = Arc::new(ManualClock::new(START_TIME));
        let client = RegistryDeployment::deploy_with_clock(config, ADMIN, OWNER, clock.clone())
            .expect("deployment");
        client.add_operator(OWNER, OPERATOR).expect("add operator");
        Self { client, clock }
    }

    /// Deadline `WINDOW` seconds from now.
    pub fn deadline(&self) -> u64 {
        self.now() + WINDOW
    }

    /// Current block time.
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Create an entry for `key` with a fresh uuid, as the operator.
    pub fn create_for(&self, key: &Secp256k1KeyPair, uri: &str) -> (u64, String) {
        let uuid = new_uuid();
        let request = self
            .client
            .sign_create(key, &uuid, uri, self.deadline())
            .expect("sign");
        let id = self.client.create_game(OPERATOR, &request).expect("create");
        (id, uuid)
    }

    /// Observations published since log index `from`.
    pub fn observations_since(&self, from: usize) -> Vec<Observation> {
        self.client
            .router()
            .logs_since(from)
            .into_iter()
            .map(|entry| entry.observation)
            .collect()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh canonical uuid string.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The registry error carried by `error`, if any.
pub fn registry_error(error: &RouterError) -> Option<&RegistryError> {
    error.module_error::<RegistryError>()
}

/// Assert `error` carries `expected` and report its category.
pub fn expect_registry_error(error: &RouterError, expected: &RegistryError) -> ErrorKind {
    assert_eq!(registry_error(error), Some(expected), "unexpected error: {error}");
    error.kind()
}
