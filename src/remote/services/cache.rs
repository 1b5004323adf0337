//! Read-through cache for project and version listings.

use crate::pagination::{Page, paginate};
use crate::remote::{
    domain::{Project, ProjectId, Version},
    ports::{ProjectApi, RemoteApiResult},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex;

/// Default freshness window for cached listings.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(3600);

/// Default number of entries per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    payload: T,
    fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    const fn new(payload: T, fetched_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            fetched_at,
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

type Slot<T> = Arc<Mutex<Option<CacheEntry<T>>>>;

/// Read-through cache in front of a [`ProjectApi`].
///
/// Project listings are filtered to active projects before they are cached.
/// Each listing is fetched again once its entry is older than the cache
/// window. Remote errors always propagate; an expired entry is never served
/// in place of a failed fetch.
///
/// Concurrent misses on the same key wait on a per-key lock, so a burst of
/// callers results in a single remote fetch.
pub struct ProjectCache<A, C>
where
    A: ProjectApi,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    clock: Arc<C>,
    ttl: TimeDelta,
    page_size: usize,
    projects: Slot<Vec<Project>>,
    versions: std::sync::Mutex<HashMap<ProjectId, Slot<Vec<Version>>>>,
}

impl<A, C> ProjectCache<A, C>
where
    A: ProjectApi,
    C: Clock + Send + Sync,
{
    /// Creates an empty cache with the given freshness window.
    #[must_use]
    pub fn new(api: Arc<A>, clock: Arc<C>, cache_duration: Duration) -> Self {
        Self {
            api,
            clock,
            ttl: TimeDelta::from_std(cache_duration).unwrap_or(TimeDelta::MAX),
            page_size: DEFAULT_PAGE_SIZE,
            projects: Arc::default(),
            versions: std::sync::Mutex::default(),
        }
    }

    /// Sets the page size used by [`Self::projects_page`] and
    /// [`Self::versions_page`].
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns the underlying remote API.
    #[must_use]
    pub const fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Returns the configured page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the active projects, fetching them when the cache is cold or
    /// expired.
    ///
    /// # Errors
    ///
    /// Returns the remote error when a fetch is needed and fails.
    pub async fn get_projects(&self) -> RemoteApiResult<Vec<Project>> {
        let mut slot = self.projects.lock().await;
        if let Some(entry) = slot
            .as_ref()
            .filter(|entry| entry.is_fresh(self.clock.utc(), self.ttl))
        {
            tracing::debug!(count = entry.payload.len(), "project cache hit");
            return Ok(entry.payload.clone());
        }

        tracing::debug!("project cache miss, fetching from remote");
        let projects = self.fetch_active_projects().await?;
        *slot = Some(CacheEntry::new(projects.clone(), self.clock.utc()));
        Ok(projects)
    }

    /// Returns the versions of `project_id`, fetching them when the cache is
    /// cold or expired.
    ///
    /// # Errors
    ///
    /// Returns the remote error when a fetch is needed and fails.
    pub async fn get_versions(&self, project_id: ProjectId) -> RemoteApiResult<Vec<Version>> {
        let slot = self.version_slot(project_id);
        let mut guard = slot.lock().await;
        if let Some(entry) = guard
            .as_ref()
            .filter(|entry| entry.is_fresh(self.clock.utc(), self.ttl))
        {
            tracing::debug!(%project_id, count = entry.payload.len(), "version cache hit");
            return Ok(entry.payload.clone());
        }

        tracing::debug!(%project_id, "version cache miss, fetching from remote");
        let versions = self.api.list_versions(project_id).await?;
        *guard = Some(CacheEntry::new(versions.clone(), self.clock.utc()));
        Ok(versions)
    }

    /// Looks a project up by identifier in the cached listing.
    ///
    /// # Errors
    ///
    /// Returns the remote error when the listing has to be fetched and fails.
    pub async fn find_project(&self, project_id: ProjectId) -> RemoteApiResult<Option<Project>> {
        Ok(self
            .get_projects()
            .await?
            .into_iter()
            .find(|project| project.id() == project_id))
    }

    /// Discards every cached listing and fetches the projects again.
    ///
    /// Returns the first page of the fresh listing, since any page index the
    /// caller held refers to the discarded data.
    ///
    /// # Errors
    ///
    /// Returns the remote error when the fetch fails; the cache is left empty.
    pub async fn force_refresh(&self) -> RemoteApiResult<Page<Project>> {
        let mut slot = self.projects.lock().await;
        *slot = None;
        self.versions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        tracing::info!("forced refresh of project cache");
        let projects = self.fetch_active_projects().await?;
        let page = paginate(&projects, 0, self.page_size);
        *slot = Some(CacheEntry::new(projects, self.clock.utc()));
        Ok(page)
    }

    /// Drops the cached versions of one project.
    pub fn invalidate_versions(&self, project_id: ProjectId) {
        self.versions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&project_id);
    }

    /// Returns one page of the active project listing.
    ///
    /// # Errors
    ///
    /// Returns the remote error when the listing has to be fetched and fails.
    pub async fn projects_page(&self, page: usize) -> RemoteApiResult<Page<Project>> {
        let projects = self.get_projects().await?;
        Ok(paginate(&projects, page, self.page_size))
    }

    /// Returns one page of a project's version listing.
    ///
    /// # Errors
    ///
    /// Returns the remote error when the listing has to be fetched and fails.
    pub async fn versions_page(
        &self,
        project_id: ProjectId,
        page: usize,
    ) -> RemoteApiResult<Page<Version>> {
        let versions = self.get_versions(project_id).await?;
        Ok(paginate(&versions, page, self.page_size))
    }

    async fn fetch_active_projects(&self) -> RemoteApiResult<Vec<Project>> {
        let mut projects = self.api.list_projects().await?;
        projects.retain(Project::is_active);
        tracing::debug!(count = projects.len(), "fetched active projects");
        Ok(projects)
    }

    fn version_slot(&self, project_id: ProjectId) -> Slot<Vec<Version>> {
        let mut slots = self
            .versions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(project_id).or_default())
    }
}
