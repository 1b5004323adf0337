//! Remote project and version listings.

use super::{ProjectId, VersionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A project as listed by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    identifier: String,
    href: String,
    active: bool,
}

impl Project {
    /// Creates an active project listing entry.
    #[must_use]
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        identifier: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            identifier: identifier.into(),
            href: href.into(),
            active: true,
        }
    }

    /// Marks whether the remote project is active.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the URL slug used in UI links.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the API self-link.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Returns `true` when the remote project is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Lifecycle status of a remote version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    /// The version accepts new work.
    Open,
    /// The version is closed.
    Closed,
    /// Any other remote status (for example `locked`).
    Other,
}

impl VersionStatus {
    /// Maps a remote status string; unknown values become [`Self::Other`].
    #[must_use]
    pub fn from_remote(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            _ => Self::Other,
        }
    }

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A version scoped to a remote project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    id: VersionId,
    name: String,
    status: VersionStatus,
    description: String,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
}

impl Version {
    /// Creates a version with the given status and no schedule.
    #[must_use]
    pub fn new(id: VersionId, name: impl Into<String>, status: VersionStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            description: String::new(),
            start_date: None,
            due_date: None,
        }
    }

    /// Sets the version description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the version schedule.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        start_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        self.start_date = start_date;
        self.due_date = due_date;
        self
    }

    /// Returns the version identifier.
    #[must_use]
    pub const fn id(&self) -> VersionId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> VersionStatus {
        self.status
    }

    /// Returns the raw description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the scheduled start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the scheduled end date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}
