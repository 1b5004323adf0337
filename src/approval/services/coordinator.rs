//! Approval workflow orchestration.

use crate::approval::{
    domain::{
        ApprovalNotice, CreationFailure, DecisionKind, InconsistentStateNotice, Participant,
        PendingEntry, PendingSubmission, RejectionNotice, SubmissionId, SubmitTaskRequest,
        TaskBuilder, ValidationError,
    },
    ports::{ApprovalNotifier, NotifierError, NotifierResult, PendingTaskRegistry, RegistryError},
};
use crate::remote::{
    domain::{CreatedTask, Project, ProjectId, RemoteTaskResult, TaskLink, Version},
    ports::{ProjectApi, RemoteApiError},
    services::ProjectCache,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// A decision taken on a pending submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Create the remote task.
    Approve,
    /// Discard the submission.
    Reject {
        /// Why the submission was refused; must not be blank.
        reason: String,
    },
}

/// The applied outcome of a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionOutcome {
    /// The remote task was created.
    Approved(ApprovalNotice),
    /// The submission was discarded.
    Rejected(RejectionNotice),
}

/// Service-level errors for the approval workflow.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Input validation failed; nothing was registered or sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The submission is unknown or a decision was already applied.
    #[error("submission not found or already processed: {0}")]
    NotFound(SubmissionId),

    /// The registry rejected the operation.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A remote listing failed.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),

    /// The approver could not be told about a new submission, so it was
    /// withdrawn.
    #[error("approver could not be notified about submission {submission_id}: {source}")]
    Notification {
        /// The withdrawn submission.
        submission_id: SubmissionId,
        /// The delivery failure.
        source: NotifierError,
    },

    /// The approval is final but the remote task does not exist.
    #[error("submission {submission_id} was approved but the task was not created: {failure}")]
    ApprovedButNotCreated {
        /// The resolved submission.
        submission_id: SubmissionId,
        /// Why creation failed.
        failure: CreationFailure,
    },

    /// The task applying an approval ended without finishing.
    #[error("approval of submission {submission_id} was interrupted: {reason}")]
    DecisionInterrupted {
        /// The claimed submission.
        submission_id: SubmissionId,
        /// Why the task ended.
        reason: String,
    },
}

/// Result type for approval workflow operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Orchestrates submissions and decisions.
///
/// Every registered submission receives at most one decision: decisions
/// claim their entry atomically, and the entry leaves the registry once the
/// decision is applied, whatever its outcome.
pub struct ApprovalCoordinator<R, A, N, C>
where
    R: PendingTaskRegistry,
    A: ProjectApi,
    N: ApprovalNotifier,
    C: Clock + Send + Sync,
{
    registry: Arc<R>,
    cache: Arc<ProjectCache<A, C>>,
    notifier: Arc<N>,
    clock: Arc<C>,
    builder: TaskBuilder,
    broadcast_channel: Option<String>,
}

impl<R, A, N, C> Clone for ApprovalCoordinator<R, A, N, C>
where
    R: PendingTaskRegistry,
    A: ProjectApi,
    N: ApprovalNotifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            cache: Arc::clone(&self.cache),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
            builder: self.builder.clone(),
            broadcast_channel: self.broadcast_channel.clone(),
        }
    }
}

impl<R, A, N, C> ApprovalCoordinator<R, A, N, C>
where
    R: PendingTaskRegistry,
    A: ProjectApi,
    N: ApprovalNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator with the default task builder and no broadcast
    /// channel.
    #[must_use]
    pub fn new(
        registry: Arc<R>,
        cache: Arc<ProjectCache<A, C>>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            registry,
            cache,
            notifier,
            clock,
            builder: TaskBuilder::default(),
            broadcast_channel: None,
        }
    }

    /// Replaces the task builder.
    #[must_use]
    pub fn with_builder(mut self, builder: TaskBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Announces approved tasks on `channel` as well.
    #[must_use]
    pub fn with_broadcast_channel(mut self, channel: impl Into<String>) -> Self {
        self.broadcast_channel = Some(channel.into());
        self
    }

    /// Returns the project cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<ProjectCache<A, C>> {
        &self.cache
    }

    /// Validates a request, registers it, and notifies the approver.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Validation`] when the request is invalid, in
    /// which case nothing is registered. Returns [`ApprovalError::Registry`]
    /// when the id is already in use, and [`ApprovalError::Notification`]
    /// when the approver cannot be reached; the registration is withdrawn in
    /// that case.
    pub async fn submit(&self, request: SubmitTaskRequest) -> ApprovalResult<PendingSubmission> {
        let id = request.submission_id();
        let submission = PendingSubmission::new(id, request, self.clock.utc())?;
        self.builder.build_payload(&submission)?;

        self.registry.add(submission.clone()).await?;
        if let Err(source) = self.notifier.on_submission_created(&submission).await {
            tracing::warn!(
                submission_id = %submission.id(),
                error = %source,
                "approver notification failed, withdrawing submission"
            );
            if let Err(err) = self.registry.remove(submission.id()).await {
                tracing::error!(
                    submission_id = %submission.id(),
                    error = %err,
                    "unannounced submission could not be withdrawn"
                );
            }
            return Err(ApprovalError::Notification {
                submission_id: submission.id().clone(),
                source,
            });
        }

        tracing::info!(
            submission_id = %submission.id(),
            project_id = ?submission.project_id(),
            approver = submission.approver().id(),
            "submission registered"
        );
        Ok(submission)
    }

    /// Approves a submission and creates the remote task.
    ///
    /// `decided_by` is recorded as the approver in the remote description.
    /// Once the submission is claimed, the remote call and the resolution run
    /// on a spawned task, so dropping the returned future does not leave the
    /// entry stuck in the approving state.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::NotFound`] when the submission is unknown or
    /// already decided. Returns [`ApprovalError::ApprovedButNotCreated`] when
    /// the remote task could not be created; the submission is resolved
    /// regardless and both participants are told. Returns
    /// [`ApprovalError::DecisionInterrupted`] when the spawned task panics or
    /// the runtime shuts down; the entry is then left claimed.
    pub async fn approve(
        &self,
        id: &SubmissionId,
        decided_by: Participant,
    ) -> ApprovalResult<ApprovalNotice>
    where
        R: 'static,
        A: 'static,
        N: 'static,
        C: 'static,
    {
        let entry = self.claim(id, DecisionKind::Approve).await?;
        let submission = entry.into_submission().with_approver(decided_by);

        let coordinator = self.clone();
        let handle = tokio::spawn(async move { coordinator.apply_approval(submission).await });
        handle.await.unwrap_or_else(|err| {
            tracing::error!(
                submission_id = %id,
                error = %err,
                "approval task ended before the submission was resolved"
            );
            Err(ApprovalError::DecisionInterrupted {
                submission_id: id.clone(),
                reason: err.to_string(),
            })
        })
    }

    async fn apply_approval(
        &self,
        submission: PendingSubmission,
    ) -> ApprovalResult<ApprovalNotice> {
        let id = submission.id().clone();
        match self.create_remote_task(&submission).await {
            Ok(result) => {
                tracing::info!(
                    submission_id = %id,
                    task_id = %result.task_id(),
                    link = %result.link(),
                    "remote task created"
                );
                let notice = ApprovalNotice::new(submission, result);
                log_delivery(&id, "approved", &self.notifier.on_approved(&notice).await);
                if let Some(channel) = self.broadcast_channel.as_deref() {
                    log_delivery(
                        &id,
                        "broadcast",
                        &self.notifier.on_broadcast(channel, &notice).await,
                    );
                }
                self.resolve(&id).await;
                Ok(notice)
            }
            Err(failure) => {
                tracing::error!(
                    submission_id = %id,
                    error = %failure,
                    "submission approved but remote task was not created"
                );
                let notice = InconsistentStateNotice::new(submission, failure.clone());
                log_delivery(
                    &id,
                    "inconsistent state",
                    &self.notifier.on_inconsistent_state(&notice).await,
                );
                self.resolve(&id).await;
                Err(ApprovalError::ApprovedButNotCreated {
                    submission_id: id,
                    failure,
                })
            }
        }
    }

    /// Rejects a submission. No remote call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Validation`] when `reason` is blank, checked
    /// before the submission is claimed, and [`ApprovalError::NotFound`] when
    /// the submission is unknown or already decided.
    pub async fn reject(
        &self,
        id: &SubmissionId,
        decided_by: Participant,
        reason: &str,
    ) -> ApprovalResult<RejectionNotice> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::MissingRejectReason.into());
        }

        let entry = self.claim(id, DecisionKind::Reject).await?;
        let notice = RejectionNotice::new(entry.into_submission(), decided_by, reason);
        log_delivery(id, "rejected", &self.notifier.on_rejected(&notice).await);
        self.resolve(id).await;
        tracing::info!(submission_id = %id, "submission rejected");
        Ok(notice)
    }

    /// Applies `decision` to a submission.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::approve`] or [`Self::reject`].
    pub async fn decide(
        &self,
        id: &SubmissionId,
        decided_by: Participant,
        decision: Decision,
    ) -> ApprovalResult<DecisionOutcome>
    where
        R: 'static,
        A: 'static,
        N: 'static,
        C: 'static,
    {
        match decision {
            Decision::Approve => self
                .approve(id, decided_by)
                .await
                .map(DecisionOutcome::Approved),
            Decision::Reject { reason } => self
                .reject(id, decided_by, &reason)
                .await
                .map(DecisionOutcome::Rejected),
        }
    }

    /// Returns every pending entry, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Registry`] when the registry cannot be read.
    pub async fn pending(&self) -> ApprovalResult<Vec<PendingEntry>> {
        let mut entries = self.registry.list().await?;
        entries.sort_by(|left, right| {
            left.submission()
                .submitted_at()
                .cmp(&right.submission().submitted_at())
                .then_with(|| left.submission().id().cmp(right.submission().id()))
        });
        Ok(entries)
    }

    /// Returns the pending entries assigned to one approver, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Registry`] when the registry cannot be read.
    pub async fn pending_for_approver(
        &self,
        approver_id: &str,
    ) -> ApprovalResult<Vec<PendingEntry>> {
        let mut entries = self.pending().await?;
        entries.retain(|entry| entry.submission().approver().id() == approver_id);
        Ok(entries)
    }

    /// Returns the active projects from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Remote`] when the listing must be fetched and
    /// fails.
    pub async fn projects(&self) -> ApprovalResult<Vec<Project>> {
        Ok(self.cache.get_projects().await?)
    }

    /// Returns the versions of a project from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Remote`] when the listing must be fetched and
    /// fails.
    pub async fn versions(&self, project_id: ProjectId) -> ApprovalResult<Vec<Version>> {
        Ok(self.cache.get_versions(project_id).await?)
    }

    async fn claim(&self, id: &SubmissionId, kind: DecisionKind) -> ApprovalResult<PendingEntry> {
        let entry = self
            .registry
            .claim(id, kind)
            .await?
            .ok_or_else(|| ApprovalError::NotFound(id.clone()))?;
        tracing::debug!(submission_id = %id, state = %entry.state(), "decision claimed");
        Ok(entry)
    }

    async fn resolve(&self, id: &SubmissionId) {
        if let Err(err) = self.registry.remove(id).await {
            tracing::error!(
                submission_id = %id,
                error = %err,
                "resolved submission could not be removed"
            );
        }
    }

    async fn create_remote_task(
        &self,
        submission: &PendingSubmission,
    ) -> Result<RemoteTaskResult, CreationFailure> {
        let payload = self.builder.build_payload(submission)?;
        let created = self.cache.api().create_task(&payload).await?;

        match (submission.version(), created.version_href()) {
            (Some(version), None) => tracing::warn!(
                submission_id = %submission.id(),
                version_id = %version.id(),
                "requested version was not applied to the created task"
            ),
            (None, _) => tracing::debug!(
                submission_id = %submission.id(),
                "task created without a version"
            ),
            (Some(_), Some(_)) => {}
        }

        let link = self.compose_link(submission.project_id(), &created).await;
        Ok(RemoteTaskResult::new(created.id(), link, created.into_raw()))
    }

    async fn compose_link(
        &self,
        project_id: Option<ProjectId>,
        created: &CreatedTask,
    ) -> TaskLink {
        let base_url = self.cache.api().base_url();
        let project = match project_id {
            Some(project_id) => match self.cache.find_project(project_id).await {
                Ok(project) => project,
                Err(err) => {
                    tracing::warn!(
                        %project_id,
                        error = %err,
                        "project lookup failed, using API link"
                    );
                    None
                }
            },
            None => None,
        };

        project.map_or_else(
            || TaskLink::Api(format!("{base_url}{}", created.self_href())),
            |project| {
                TaskLink::Ui(format!(
                    "{base_url}/projects/{}/work_packages/{}/overview",
                    project.identifier(),
                    created.id()
                ))
            },
        )
    }
}

fn log_delivery(id: &SubmissionId, event: &'static str, result: &NotifierResult<()>) {
    if let Err(err) = result {
        tracing::warn!(submission_id = %id, event, error = %err, "notification failed");
    }
}
