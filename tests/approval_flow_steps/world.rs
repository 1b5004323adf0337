//! Shared world state for approval flow BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskgate::{
    approval::{
        adapters::memory::{InMemoryPendingRegistry, RecordingNotifier},
        domain::{Participant, PendingSubmission, SubmitTaskRequest},
        services::{ApprovalCoordinator, ApprovalError, DecisionOutcome},
    },
    remote::{
        adapters::InMemoryProjectApi,
        domain::{ProjectId, VersionId},
        services::{DEFAULT_CACHE_DURATION, ProjectCache},
    },
};

/// Base URL of the simulated remote instance.
pub const BASE_URL: &str = "https://pm.example.test";

/// Coordinator type used by the BDD world.
pub type TestCoordinator = ApprovalCoordinator<
    InMemoryPendingRegistry,
    InMemoryProjectApi,
    RecordingNotifier,
    DefaultClock,
>;

/// Scenario world for approval flow behaviour tests.
pub struct ApprovalWorld {
    pub api: Arc<InMemoryProjectApi>,
    pub registry: Arc<InMemoryPendingRegistry>,
    pub coordinator: TestCoordinator,
    pub project: Option<(ProjectId, String)>,
    pub version: Option<(VersionId, String)>,
    pub pending_request: Option<SubmitTaskRequest>,
    pub submission: Option<PendingSubmission>,
    pub last_submit_result: Option<Result<PendingSubmission, ApprovalError>>,
    pub decisions: Vec<Result<DecisionOutcome, ApprovalError>>,
}

impl ApprovalWorld {
    /// Creates a world backed by an empty in-memory remote.
    #[must_use]
    pub fn new() -> Self {
        let api = Arc::new(InMemoryProjectApi::new(BASE_URL));
        let registry = Arc::new(InMemoryPendingRegistry::new());
        let cache = Arc::new(ProjectCache::new(
            Arc::clone(&api),
            Arc::new(DefaultClock),
            DEFAULT_CACHE_DURATION,
        ));
        let coordinator = ApprovalCoordinator::new(
            Arc::clone(&registry),
            cache,
            Arc::new(RecordingNotifier::new()),
            Arc::new(DefaultClock),
        );

        Self {
            api,
            registry,
            coordinator,
            project: None,
            version: None,
            pending_request: None,
            submission: None,
            last_submit_result: None,
            decisions: Vec::new(),
        }
    }
}

impl Default for ApprovalWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ApprovalWorld {
    ApprovalWorld::default()
}

/// Builds a chat participant whose id derives from the display name.
pub fn participant(name: &str) -> Participant {
    Participant::new(format!("u-{}", name.to_lowercase()), name)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
