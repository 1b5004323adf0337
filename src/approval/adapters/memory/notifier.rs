//! Notifier that records every delivered event.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::approval::{
    domain::{ApprovalNotice, InconsistentStateNotice, PendingSubmission, RejectionNotice},
    ports::{ApprovalNotifier, NotifierError, NotifierResult},
};

/// An event captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    /// A submission awaits its approver.
    SubmissionCreated(PendingSubmission),
    /// A submission was approved and created remotely.
    Approved(ApprovalNotice),
    /// A submission was rejected.
    Rejected(RejectionNotice),
    /// A submission was approved but not created.
    InconsistentState(InconsistentStateNotice),
    /// An approved task was announced on a channel.
    Broadcast {
        /// Target channel.
        channel: String,
        /// The announced approval.
        notice: ApprovalNotice,
    },
}

#[derive(Debug, Default)]
struct RecorderState {
    events: Vec<NotificationEvent>,
    failing: bool,
    failed_attempts: usize,
}

/// In-memory notifier for tests and local runs.
///
/// While failing, every call returns [`NotifierError::Delivery`] and records
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<Mutex<RecorderState>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every delivery fail (`true`) or succeed (`false`).
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Returns the delivered events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.lock().events.clone()
    }

    /// Returns the number of deliveries refused while failing.
    #[must_use]
    pub fn failed_attempts(&self) -> usize {
        self.lock().failed_attempts
    }

    fn record(&self, event: NotificationEvent) -> NotifierResult<()> {
        let mut state = self.lock();
        if state.failing {
            state.failed_attempts += 1;
            return Err(NotifierError::delivery(std::io::Error::other(
                "recording notifier is set to fail",
            )));
        }
        state.events.push(event);
        Ok(())
    }
}

#[async_trait]
impl ApprovalNotifier for RecordingNotifier {
    async fn on_submission_created(&self, submission: &PendingSubmission) -> NotifierResult<()> {
        self.record(NotificationEvent::SubmissionCreated(submission.clone()))
    }

    async fn on_approved(&self, notice: &ApprovalNotice) -> NotifierResult<()> {
        self.record(NotificationEvent::Approved(notice.clone()))
    }

    async fn on_rejected(&self, notice: &RejectionNotice) -> NotifierResult<()> {
        self.record(NotificationEvent::Rejected(notice.clone()))
    }

    async fn on_inconsistent_state(
        &self,
        notice: &InconsistentStateNotice,
    ) -> NotifierResult<()> {
        self.record(NotificationEvent::InconsistentState(notice.clone()))
    }

    async fn on_broadcast(&self, channel: &str, notice: &ApprovalNotice) -> NotifierResult<()> {
        self.record(NotificationEvent::Broadcast {
            channel: channel.to_owned(),
            notice: notice.clone(),
        })
    }
}
