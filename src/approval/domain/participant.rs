//! People involved in a submission and the version it targets.

use crate::remote::domain::VersionId;
use serde::{Deserialize, Serialize};

/// A chat user taking part in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: String,
    display_name: String,
    automated: bool,
}

impl Participant {
    /// Creates a human participant.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            automated: false,
        }
    }

    /// Marks the participant as an automated account.
    #[must_use]
    pub const fn with_automated(mut self, automated: bool) -> Self {
        self.automated = automated;
        self
    }

    /// Returns the chat user identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns `true` for automated accounts.
    #[must_use]
    pub const fn is_automated(&self) -> bool {
        self.automated
    }
}

/// The remote version a submission should be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    id: VersionId,
    name: String,
}

impl VersionRef {
    /// Creates a version reference.
    #[must_use]
    pub fn new(id: VersionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the remote version identifier.
    #[must_use]
    pub const fn id(&self) -> VersionId {
        self.id
    }

    /// Returns the version name shown to users.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
