//! # Registry Telemetry
//!
//! Log subscriber setup and structured log macros shared by every registry
//! crate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GR_SERVICE_NAME` | `game-registry` | Service name in logs |
//! | `GR_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `GR_CONSOLE_OUTPUT` | `true` | Console output |
//! | `GR_JSON_LOGS` | `false` (true in containers) | JSON formatting |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::env_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),

    /// The log filter could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global log subscriber described by `config`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}

/// Install the subscriber for tests; repeated calls are no-ops.
pub fn init_test_telemetry() {
    let config = TelemetryConfig {
        log_level: "debug".to_string(),
        ..TelemetryConfig::default()
    };
    let _ = init_telemetry(&config);
}

/// Create a span with component context.
///
/// ```rust,ignore
/// let _span = component_span!("apply_module_cuts", component = "router", cuts = 2).entered();
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
