//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not merge or extract the configuration sources.
    #[error("configuration could not be loaded: {0}")]
    Load(Box<figment::Error>),

    /// A required setting is missing or empty.
    #[error("required setting '{field}' is not configured")]
    NotConfigured {
        /// Dotted path of the missing setting.
        field: &'static str,
    },

    /// A setting has a value outside its allowed range.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// Why the value was refused.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}
