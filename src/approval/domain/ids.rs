//! Submission identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique key of a pending submission.
///
/// Identifiers are built from the requester and the interaction that opened
/// the submission form, so one interaction can only ever submit once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds the identifier for a requester's interaction.
    #[must_use]
    pub fn for_interaction(requester_id: &str, interaction_id: &str) -> Self {
        Self(format!("{requester_id}_{interaction_id}"))
    }

    /// Generates a random identifier for submissions without an interaction.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
