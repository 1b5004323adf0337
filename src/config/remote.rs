//! Remote API connection settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default request timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    30
}

fn default_api_user() -> String {
    "apikey".to_owned()
}

fn default_type_href() -> String {
    "/api/v3/types/1".to_owned()
}

fn default_status_href() -> String {
    "/api/v3/statuses/2".to_owned()
}

/// Connection settings for the remote project API.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteSettings {
    /// Instance root URL, without the `/api/v3` prefix.
    #[serde(default)]
    pub base_url: String,

    /// API key sent as the basic-auth password.
    #[serde(default)]
    pub api_key: String,

    /// Basic-auth user name paired with the API key.
    #[serde(default = "default_api_user")]
    pub api_user: String,

    /// Upper bound on a single request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Task type reference attached to every created task.
    #[serde(default = "default_type_href")]
    pub type_href: String,

    /// Initial status reference attached to every created task.
    #[serde(default = "default_status_href")]
    pub status_href: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            api_user: default_api_user(),
            request_timeout_secs: default_request_timeout_secs(),
            type_href: default_type_href(),
            status_href: default_status_href(),
        }
    }
}

impl RemoteSettings {
    /// Creates settings for the given instance and key, other fields at their
    /// defaults.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Returns `true` when both the base URL and API key are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for RemoteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("RemoteSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("api_user", &self.api_user)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("type_href", &self.type_href)
            .field("status_href", &self.status_href)
            .finish()
    }
}
