//! Layered startup configuration.
//!
//! Configuration sources, highest priority first:
//! 1. Environment variables prefixed `TASKGATE_`, with `__` separating
//!    sections (`TASKGATE_REMOTE__API_KEY` maps to `remote.api_key`)
//! 2. Legacy variables `OPENPROJECT_URL`, `OPENPROJECT_API_KEY` and
//!    `DEFAULT_NOTIFICATION_CHANNEL`
//! 3. `taskgate.toml` in the working directory
//! 4. Built-in defaults
//!
//! Settings are read once at startup and passed by value into the services
//! that need them.

mod cache;
mod error;
mod notifications;
mod remote;
mod ui;

pub use cache::CacheSettings;
pub use error::ConfigError;
pub use notifications::NotificationSettings;
pub use remote::RemoteSettings;
pub use ui::UiSettings;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, UncasedStr},
};
use serde::{Deserialize, Serialize};

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "taskgate.toml";

/// Prefix of the environment variables read into the configuration.
pub const ENV_PREFIX: &str = "TASKGATE_";

const LEGACY_ENV: [(&str, &str); 3] = [
    ("OPENPROJECT_URL", "remote.base_url"),
    ("OPENPROJECT_API_KEY", "remote.api_key"),
    ("DEFAULT_NOTIFICATION_CHANNEL", "notifications.broadcast_channel"),
];

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Remote API connection.
    #[serde(default)]
    pub remote: RemoteSettings,
    /// Listing cache.
    #[serde(default)]
    pub cache: CacheSettings,
    /// Paginated selection lists.
    #[serde(default)]
    pub ui: UiSettings,
    /// Outcome announcements.
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Settings {
    /// Loads configuration from the file and environment layers.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that. The
    /// result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Loads `.env` from the working directory, then the configuration.
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] under the same conditions as
    /// [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(error = %err, ".env file could not be read");
        }
        Self::load()
    }

    /// Builds the provider chain.
    ///
    /// Public so callers can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(
                Env::raw()
                    .only(&LEGACY_ENV.map(|(name, _)| name))
                    .map(legacy_key),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks the settings needed to start the service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the base URL or API key is
    /// empty, and [`ConfigError::InvalidValue`] when the cache window or page
    /// size is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.base_url.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "remote.base_url",
            });
        }
        if self.remote.api_key.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "remote.api_key",
            });
        }
        if self.cache.duration_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.duration_secs",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.ui.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ui.page_size",
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}

fn legacy_key(key: &UncasedStr) -> Uncased<'_> {
    LEGACY_ENV
        .iter()
        .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
        .map_or_else(|| key.as_str().into(), |(_, path)| (*path).into())
}
