//! Domain model for remote projects, versions, and created tasks.
//!
//! Listings are immutable once fetched. Payload types serialize directly into
//! the JSON body the remote create-task endpoint expects.

mod ids;
mod project;
mod task;

pub use ids::{ParseRemoteIdError, ProjectId, RemoteTaskId, VersionId};
pub use project::{Project, Version, VersionStatus};
pub use task::{
    API_PREFIX, CreatedTask, FormattableText, HrefLink, RemoteTaskPayload, RemoteTaskResult,
    TaskLink, TaskLinks,
};
