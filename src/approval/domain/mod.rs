//! Domain model for approval-gated task submissions.

mod builder;
mod error;
mod ids;
mod notice;
mod participant;
mod state;
mod submission;

pub use builder::{DEFAULT_TASK_TYPE, INITIAL_STATUS, TaskBuilder};
pub use error::{DateField, ValidationError};
pub use ids::SubmissionId;
pub use notice::{ApprovalNotice, CreationFailure, InconsistentStateNotice, RejectionNotice};
pub use participant::{Participant, VersionRef};
pub use state::{DecisionKind, PendingEntry, SubmissionState};
pub use submission::{PendingSubmission, SubmitTaskRequest};
