//! Registry port for submissions awaiting a decision.

use crate::approval::domain::{DecisionKind, PendingEntry, PendingSubmission, SubmissionId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pending registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Store of pending submissions keyed by submission id.
///
/// Implementations own their entries exclusively. A removed id is retired:
/// it can never be registered again, and every later lookup yields `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PendingTaskRegistry: Send + Sync {
    /// Registers a submission in the `Submitted` state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the id is registered and
    /// [`RegistryError::Retired`] when it was registered and removed before.
    async fn add(&self, submission: PendingSubmission) -> RegistryResult<()>;

    /// Returns the entry for `id`, or `None` when absent.
    async fn get(&self, id: &SubmissionId) -> RegistryResult<Option<PendingEntry>>;

    /// Atomically moves a `Submitted` entry into the claimed state for `kind`
    /// and returns the claimed entry.
    ///
    /// Returns `None` when the id is absent or another decision already
    /// claimed it. At most one claim per id ever succeeds.
    async fn claim(
        &self,
        id: &SubmissionId,
        kind: DecisionKind,
    ) -> RegistryResult<Option<PendingEntry>>;

    /// Removes and retires `id`. Removing an absent id is a no-op.
    async fn remove(&self, id: &SubmissionId) -> RegistryResult<()>;

    /// Returns every registered entry, in no particular order.
    async fn list(&self) -> RegistryResult<Vec<PendingEntry>>;

    /// Returns the number of registered entries.
    async fn len(&self) -> RegistryResult<usize>;

    /// Returns `true` when nothing is registered.
    async fn is_empty(&self) -> RegistryResult<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Errors returned by pending registry implementations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The id is already registered.
    #[error("submission already registered: {0}")]
    Duplicate(SubmissionId),

    /// The id was used by a submission that has since been resolved.
    #[error("submission id was already used: {0}")]
    Retired(SubmissionId),

    /// Storage-layer failure.
    #[error("registry storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
