//! Scriptable in-memory remote API for tests and local runs.

use crate::remote::{
    domain::{CreatedTask, Project, ProjectId, RemoteTaskId, RemoteTaskPayload, Version},
    ports::{ProjectApi, RemoteApiError, RemoteApiResult},
};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct State {
    projects: Vec<Project>,
    versions: HashMap<ProjectId, Vec<Version>>,
    project_failure: Option<RemoteApiError>,
    version_failure: Option<RemoteApiError>,
    create_failure: Option<RemoteApiError>,
    project_fetches: usize,
    version_fetches: HashMap<ProjectId, usize>,
    created: Vec<RemoteTaskPayload>,
    next_task_id: u64,
    drop_version_links: bool,
    latency: Option<Duration>,
}

/// In-memory remote API.
///
/// Created tasks receive sequential identifiers starting at 1. Failures can be
/// injected per operation and persist until cleared.
#[derive(Debug, Clone)]
pub struct InMemoryProjectApi {
    base_url: String,
    state: Arc<Mutex<State>>,
}

impl InMemoryProjectApi {
    /// Creates an empty fake rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            state: Arc::new(Mutex::new(State {
                next_task_id: 1,
                ..State::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a project to the listing.
    pub fn add_project(&self, project: Project) {
        self.lock().projects.push(project);
    }

    /// Adds a version to a project's listing.
    pub fn add_version(&self, project_id: ProjectId, version: Version) {
        self.lock()
            .versions
            .entry(project_id)
            .or_default()
            .push(version);
    }

    /// Makes project listings fail with `error`, or succeed again with `None`.
    pub fn fail_projects_with(&self, error: Option<RemoteApiError>) {
        self.lock().project_failure = error;
    }

    /// Makes version listings fail with `error`, or succeed again with `None`.
    pub fn fail_versions_with(&self, error: Option<RemoteApiError>) {
        self.lock().version_failure = error;
    }

    /// Makes task creation fail with `error`, or succeed again with `None`.
    pub fn fail_create_with(&self, error: Option<RemoteApiError>) {
        self.lock().create_failure = error;
    }

    /// Simulates a remote system that silently ignores requested versions.
    pub fn drop_version_links(&self, drop: bool) {
        self.lock().drop_version_links = drop;
    }

    /// Delays every call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.lock().latency = latency;
    }

    /// Number of project listing calls received.
    #[must_use]
    pub fn project_fetches(&self) -> usize {
        self.lock().project_fetches
    }

    /// Number of version listing calls received for `project_id`.
    #[must_use]
    pub fn version_fetches(&self, project_id: ProjectId) -> usize {
        self.lock()
            .version_fetches
            .get(&project_id)
            .copied()
            .unwrap_or(0)
    }

    /// Payloads of every successful create call, oldest first.
    #[must_use]
    pub fn created(&self) -> Vec<RemoteTaskPayload> {
        self.lock().created.clone()
    }

    async fn pause(&self) {
        let latency = self.lock().latency;
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ProjectApi for InMemoryProjectApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_projects(&self) -> RemoteApiResult<Vec<Project>> {
        self.pause().await;
        let mut state = self.lock();
        state.project_fetches += 1;
        if let Some(error) = state.project_failure.clone() {
            return Err(error);
        }
        Ok(state.projects.clone())
    }

    async fn list_versions(&self, project_id: ProjectId) -> RemoteApiResult<Vec<Version>> {
        self.pause().await;
        let mut state = self.lock();
        *state.version_fetches.entry(project_id).or_insert(0) += 1;
        if let Some(error) = state.version_failure.clone() {
            return Err(error);
        }
        Ok(state.versions.get(&project_id).cloned().unwrap_or_default())
    }

    async fn create_task(&self, payload: &RemoteTaskPayload) -> RemoteApiResult<CreatedTask> {
        self.pause().await;
        let mut state = self.lock();
        if let Some(error) = state.create_failure.clone() {
            return Err(error);
        }

        let id = state.next_task_id;
        state.next_task_id += 1;
        state.created.push(payload.clone());

        let self_href = format!("/api/v3/work_packages/{id}");
        let applied_version = if state.drop_version_links {
            None
        } else {
            payload.links.version.as_ref().map(|link| link.href.clone())
        };
        let raw = json!({
            "id": id,
            "subject": payload.subject,
            "_links": {
                "self": {"href": self_href},
                "project": {"href": payload.links.project.href},
                "version": {"href": applied_version},
            }
        });

        let mut created = CreatedTask::new(RemoteTaskId::new(id), self_href, raw);
        if let Some(version) = applied_version {
            created = created.with_version_href(version);
        }
        Ok(created)
    }
}
