//! Presentation-facing settings.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> usize {
    10
}

/// Settings consumed by paginated selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Entries shown per page of a project or version listing.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}
