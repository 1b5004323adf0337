//! Listing cache settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cache window in seconds.
const fn default_duration_secs() -> u64 {
    3600
}

/// How long fetched project and version listings stay fresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Cache window in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
        }
    }
}

impl CacheSettings {
    /// Returns the cache window.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}
