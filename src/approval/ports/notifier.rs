//! Notification port the presentation layer binds to.

use crate::approval::domain::{
    ApprovalNotice, InconsistentStateNotice, PendingSubmission, RejectionNotice,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Receives workflow outcomes and renders them for people.
///
/// The coordinator calls exactly one outcome method per decision. It never
/// formats user-facing text itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApprovalNotifier: Send + Sync {
    /// A submission was registered and awaits the approver.
    async fn on_submission_created(&self, submission: &PendingSubmission) -> NotifierResult<()>;

    /// A submission was approved and the remote task created.
    async fn on_approved(&self, notice: &ApprovalNotice) -> NotifierResult<()>;

    /// A submission was rejected.
    async fn on_rejected(&self, notice: &RejectionNotice) -> NotifierResult<()>;

    /// A submission was approved but no remote task exists.
    async fn on_inconsistent_state(&self, notice: &InconsistentStateNotice)
    -> NotifierResult<()>;

    /// An approved task is announced on the configured broadcast channel.
    async fn on_broadcast(&self, channel: &str, notice: &ApprovalNotice) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The notification could not be delivered.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
