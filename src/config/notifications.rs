//! Notification routing settings.

use serde::{Deserialize, Serialize};

/// Where outcome announcements go beyond the two participants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationSettings {
    /// Channel that also receives every approved task, when set.
    #[serde(default)]
    pub broadcast_channel: Option<String>,
}

impl NotificationSettings {
    /// Returns the broadcast channel, ignoring blank values.
    #[must_use]
    pub fn broadcast_channel(&self) -> Option<&str> {
        self.broadcast_channel
            .as_deref()
            .map(str::trim)
            .filter(|channel| !channel.is_empty())
    }
}
