//! Create-task request body and the result of a successful creation.

use super::{ProjectId, RemoteTaskId, VersionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path prefix of every resource reference in the remote API.
pub const API_PREFIX: &str = "/api/v3";

/// A `{ "href": ... }` resource reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrefLink {
    /// Resource path relative to the instance root.
    pub href: String,
}

impl HrefLink {
    /// Creates a reference from an arbitrary resource path.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// Reference to a project resource.
    #[must_use]
    pub fn project(id: ProjectId) -> Self {
        Self::new(format!("{API_PREFIX}/projects/{id}"))
    }

    /// Reference to a version resource.
    #[must_use]
    pub fn version(id: VersionId) -> Self {
        Self::new(format!("{API_PREFIX}/versions/{id}"))
    }
}

/// Formatted text block (`{ "format": "markdown", "raw": ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattableText {
    /// Markup format of `raw`.
    pub format: String,
    /// The text itself.
    pub raw: String,
}

impl FormattableText {
    /// Creates a markdown text block.
    #[must_use]
    pub fn markdown(raw: impl Into<String>) -> Self {
        Self {
            format: "markdown".to_owned(),
            raw: raw.into(),
        }
    }
}

/// Resource links attached to a create-task request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLinks {
    /// Owning project.
    pub project: HrefLink,
    /// Task type.
    #[serde(rename = "type")]
    pub task_type: HrefLink,
    /// Initial workflow status.
    pub status: HrefLink,
    /// Target version; omitted entirely when no version was chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<HrefLink>,
}

/// JSON body of a remote create-task request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTaskPayload {
    /// Task title.
    pub subject: String,
    /// Task description body.
    pub description: FormattableText,
    /// Resource links.
    #[serde(rename = "_links")]
    pub links: TaskLinks,
    /// ISO start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// ISO due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// ISO-8601 duration estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

/// Object returned by the remote API after a successful create call.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTask {
    id: RemoteTaskId,
    self_href: String,
    version_href: Option<String>,
    raw: serde_json::Value,
}

impl CreatedTask {
    /// Creates a created-task record.
    #[must_use]
    pub fn new(id: RemoteTaskId, self_href: impl Into<String>, raw: serde_json::Value) -> Self {
        Self {
            id,
            self_href: self_href.into(),
            version_href: None,
            raw,
        }
    }

    /// Records the version link reported back by the remote system.
    #[must_use]
    pub fn with_version_href(mut self, version_href: impl Into<String>) -> Self {
        self.version_href = Some(version_href.into());
        self
    }

    /// Returns the remote task identifier.
    #[must_use]
    pub const fn id(&self) -> RemoteTaskId {
        self.id
    }

    /// Returns the API self-link path.
    #[must_use]
    pub fn self_href(&self) -> &str {
        &self.self_href
    }

    /// Returns the version link the remote system applied, if any.
    #[must_use]
    pub fn version_href(&self) -> Option<&str> {
        self.version_href.as_deref()
    }

    /// Returns the full response body.
    #[must_use]
    pub const fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Consumes the record, returning the full response body.
    #[must_use]
    pub fn into_raw(self) -> serde_json::Value {
        self.raw
    }
}

/// Where a created task can be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLink {
    /// Browser link to the task overview page.
    Ui(String),
    /// API link, used when the owning project could not be resolved.
    Api(String),
}

impl TaskLink {
    /// Returns the link URL regardless of kind.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Ui(url) | Self::Api(url) => url,
        }
    }
}

impl fmt::Display for TaskLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

/// Outcome of a successful remote task creation. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTaskResult {
    task_id: RemoteTaskId,
    link: TaskLink,
    raw_payload: serde_json::Value,
}

impl RemoteTaskResult {
    /// Creates a result record.
    #[must_use]
    pub const fn new(task_id: RemoteTaskId, link: TaskLink, raw_payload: serde_json::Value) -> Self {
        Self {
            task_id,
            link,
            raw_payload,
        }
    }

    /// Returns the remote task identifier.
    #[must_use]
    pub const fn task_id(&self) -> RemoteTaskId {
        self.task_id
    }

    /// Returns the link to the created task.
    #[must_use]
    pub const fn link(&self) -> &TaskLink {
        &self.link
    }

    /// Returns the raw response body of the create call.
    #[must_use]
    pub const fn raw_payload(&self) -> &serde_json::Value {
        &self.raw_payload
    }
}
