//! Decision states of a pending submission.

use super::PendingSubmission;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two decisions an approver can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// Create the remote task.
    Approve,
    /// Discard the submission.
    Reject,
}

impl DecisionKind {
    /// Returns the state a submission enters once this decision claims it.
    #[must_use]
    pub const fn claimed_state(self) -> SubmissionState {
        match self {
            Self::Approve => SubmissionState::Approving,
            Self::Reject => SubmissionState::Rejecting,
        }
    }
}

/// Where a registered submission is in its decision flow.
///
/// Only `Submitted` entries can be claimed. Resolved submissions leave the
/// registry, so there is no resolved state here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Awaiting a decision.
    Submitted,
    /// An approval is being applied.
    Approving,
    /// A rejection is being applied.
    Rejecting,
}

impl SubmissionState {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approving => "approving",
            Self::Rejecting => "rejecting",
        }
    }

    /// Returns `true` when a decision may still claim the submission.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registry entry: the submission and its decision state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    submission: PendingSubmission,
    state: SubmissionState,
}

impl PendingEntry {
    /// Creates an entry in the `Submitted` state.
    #[must_use]
    pub const fn submitted(submission: PendingSubmission) -> Self {
        Self {
            submission,
            state: SubmissionState::Submitted,
        }
    }

    /// Returns the submission.
    #[must_use]
    pub const fn submission(&self) -> &PendingSubmission {
        &self.submission
    }

    /// Returns the decision state.
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Moves a `Submitted` entry into the claimed state for `kind`.
    ///
    /// Returns `false`, leaving the entry untouched, when it was already
    /// claimed.
    pub const fn claim(&mut self, kind: DecisionKind) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state = kind.claimed_state();
        true
    }

    /// Consumes the entry, returning the submission.
    #[must_use]
    pub fn into_submission(self) -> PendingSubmission {
        self.submission
    }
}
