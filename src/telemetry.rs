//! Tracing subscriber installation.
//!
//! The filter is read from `TASKGATE_LOG` using `EnvFilter` directive syntax
//! (`info`, `taskgate=debug,reqwest=warn`). When the variable is unset or
//! unparsable the caller's default level applies.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "TASKGATE_LOG";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("tracing subscriber could not be installed: {0}")]
    AlreadyInstalled(String),
}

/// Installs a formatting subscriber filtered by `TASKGATE_LOG`.
///
/// # Errors
///
/// Returns [`TelemetryError::AlreadyInstalled`] when called more than once in
/// a process, or after another subscriber was installed.
pub fn init(default_level: &str) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInstalled(err.to_string()))
}
