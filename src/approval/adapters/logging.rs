//! Notifier that writes outcomes to the tracing log.

use async_trait::async_trait;

use crate::approval::{
    domain::{ApprovalNotice, InconsistentStateNotice, PendingSubmission, RejectionNotice},
    ports::{ApprovalNotifier, NotifierResult},
};

/// Notifier for headless deployments: every outcome becomes a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl ApprovalNotifier for TracingNotifier {
    async fn on_submission_created(&self, submission: &PendingSubmission) -> NotifierResult<()> {
        tracing::info!(
            submission_id = %submission.id(),
            requester = submission.requester().display_name(),
            approver = submission.approver().display_name(),
            title = submission.title(),
            "submission awaiting approval"
        );
        Ok(())
    }

    async fn on_approved(&self, notice: &ApprovalNotice) -> NotifierResult<()> {
        tracing::info!(
            submission_id = %notice.submission().id(),
            task_id = %notice.result().task_id(),
            link = %notice.result().link(),
            "submission approved"
        );
        Ok(())
    }

    async fn on_rejected(&self, notice: &RejectionNotice) -> NotifierResult<()> {
        tracing::info!(
            submission_id = %notice.submission().id(),
            decided_by = notice.decided_by().display_name(),
            reason = notice.reason(),
            "submission rejected"
        );
        Ok(())
    }

    async fn on_inconsistent_state(
        &self,
        notice: &InconsistentStateNotice,
    ) -> NotifierResult<()> {
        tracing::error!(
            submission_id = %notice.submission().id(),
            error = %notice.failure(),
            "submission approved but remote task was not created"
        );
        Ok(())
    }

    async fn on_broadcast(&self, channel: &str, notice: &ApprovalNotice) -> NotifierResult<()> {
        tracing::info!(
            channel,
            submission_id = %notice.submission().id(),
            task_id = %notice.result().task_id(),
            "approved task announced"
        );
        Ok(())
    }
}
