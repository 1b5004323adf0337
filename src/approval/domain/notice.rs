//! Outcome records handed to notifiers.

use super::{Participant, PendingSubmission, ValidationError};
use crate::remote::{domain::RemoteTaskResult, ports::RemoteApiError};
use thiserror::Error;

/// A submission was approved and the remote task exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalNotice {
    submission: PendingSubmission,
    result: RemoteTaskResult,
}

impl ApprovalNotice {
    /// Creates an approval notice.
    #[must_use]
    pub const fn new(submission: PendingSubmission, result: RemoteTaskResult) -> Self {
        Self { submission, result }
    }

    /// Returns the approved submission; its approver is the decider.
    #[must_use]
    pub const fn submission(&self) -> &PendingSubmission {
        &self.submission
    }

    /// Returns the created remote task.
    #[must_use]
    pub const fn result(&self) -> &RemoteTaskResult {
        &self.result
    }
}

/// A submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionNotice {
    submission: PendingSubmission,
    decided_by: Participant,
    reason: String,
}

impl RejectionNotice {
    /// Creates a rejection notice.
    #[must_use]
    pub fn new(
        submission: PendingSubmission,
        decided_by: Participant,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            submission,
            decided_by,
            reason: reason.into(),
        }
    }

    /// Returns the rejected submission.
    #[must_use]
    pub const fn submission(&self) -> &PendingSubmission {
        &self.submission
    }

    /// Returns who rejected it.
    #[must_use]
    pub const fn decided_by(&self) -> &Participant {
        &self.decided_by
    }

    /// Returns the rejection reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Why an approved submission produced no remote task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreationFailure {
    /// The stored submission could not be turned into a payload.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The remote create call failed.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
}

/// A submission was approved but the remote task could not be created.
///
/// The decision is final; the submission has left the registry and needs
/// manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistentStateNotice {
    submission: PendingSubmission,
    failure: CreationFailure,
}

impl InconsistentStateNotice {
    /// Creates an inconsistent-state notice.
    #[must_use]
    pub const fn new(submission: PendingSubmission, failure: CreationFailure) -> Self {
        Self {
            submission,
            failure,
        }
    }

    /// Returns the approved submission; its approver is the decider.
    #[must_use]
    pub const fn submission(&self) -> &PendingSubmission {
        &self.submission
    }

    /// Returns why creation failed.
    #[must_use]
    pub const fn failure(&self) -> &CreationFailure {
        &self.failure
    }
}
