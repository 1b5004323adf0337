//! Remote project API port.

use crate::remote::domain::{CreatedTask, Project, ProjectId, RemoteTaskPayload, Version};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for remote API operations.
pub type RemoteApiResult<T> = Result<T, RemoteApiError>;

/// Authenticated access to the remote project-management API.
///
/// Each call performs exactly one request. Implementations never retry; a
/// failed call surfaces immediately and the caller decides what to do.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Returns the instance root URL used to build browser links.
    fn base_url(&self) -> &str;

    /// Lists every project visible to the API credential, active or not.
    async fn list_projects(&self) -> RemoteApiResult<Vec<Project>>;

    /// Lists the versions of a project.
    async fn list_versions(&self, project_id: ProjectId) -> RemoteApiResult<Vec<Version>>;

    /// Creates a task from the given payload.
    async fn create_task(&self, payload: &RemoteTaskPayload) -> RemoteApiResult<CreatedTask>;
}

/// Errors returned by remote API adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteApiError {
    /// The base URL or API key is not set.
    #[error("remote API is not configured: missing {0}")]
    NotConfigured(&'static str),

    /// The remote API answered with a status of 400 or above.
    #[error("remote API returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the server.
        body: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("remote API request timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("remote API connection failed: {0}")]
    Connection(String),

    /// The response body was not the expected JSON.
    #[error("remote API response could not be decoded: {0}")]
    Decode(String),
}
