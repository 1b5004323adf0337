//! Conversion of pending submissions into remote create-task payloads.

use super::{PendingSubmission, ValidationError};
use crate::dates;
use crate::remote::domain::{FormattableText, HrefLink, RemoteTaskPayload, TaskLinks};

/// Type reference of created tasks (the remote "Task" type).
pub const DEFAULT_TASK_TYPE: &str = "/api/v3/types/1";

/// Status reference every created task starts in ("in progress").
pub const INITIAL_STATUS: &str = "/api/v3/statuses/2";

/// Builds remote create-task payloads from pending submissions.
///
/// The initial status is fixed per deployment; requesters never choose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBuilder {
    type_href: String,
    status_href: String,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_TYPE, INITIAL_STATUS)
    }
}

impl TaskBuilder {
    /// Creates a builder attaching the given type and status references.
    #[must_use]
    pub fn new(type_href: impl Into<String>, status_href: impl Into<String>) -> Self {
        Self {
            type_href: type_href.into(),
            status_href: status_href.into(),
        }
    }

    /// Builds the create-task payload for `submission`.
    ///
    /// Dates are sent in ISO form and the estimate as an ISO-8601 duration;
    /// either is left out when it cannot be converted. The version link is
    /// present only when a version was chosen.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingProject`] when the submission has no
    /// project and [`ValidationError::MissingTitle`] when its title is blank.
    pub fn build_payload(
        &self,
        submission: &PendingSubmission,
    ) -> Result<RemoteTaskPayload, ValidationError> {
        let project_id = submission
            .project_id()
            .ok_or(ValidationError::MissingProject)?;
        let subject = submission.title().trim();
        if subject.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        Ok(RemoteTaskPayload {
            subject: subject.to_owned(),
            description: FormattableText::markdown(describe(submission)),
            links: TaskLinks {
                project: HrefLink::project(project_id),
                task_type: HrefLink::new(self.type_href.as_str()),
                status: HrefLink::new(self.status_href.as_str()),
                version: submission
                    .version()
                    .map(|version| HrefLink::version(version.id())),
            },
            start_date: iso_date(submission.start_date()),
            due_date: iso_date(submission.due_date()),
            estimated_time: submission.estimate().and_then(dates::format_duration),
        })
    }
}

fn iso_date(input: Option<&str>) -> Option<String> {
    Some(dates::convert_to_iso(input)).filter(|iso| !iso.is_empty())
}

fn describe(submission: &PendingSubmission) -> String {
    let mut lines = Vec::with_capacity(6);
    if let Some(description) = submission.description().filter(|text| !text.trim().is_empty()) {
        lines.push(description.to_owned());
    }
    if let Some(start) = submission.start_date() {
        lines.push(format!("Start date: {start}"));
    }
    if let Some(due) = submission.due_date() {
        lines.push(format!("Due date: {due}"));
    }
    if let Some(version) = submission.version() {
        lines.push(format!("Version: {}", version.name()));
    }
    lines.push(format!(
        "Requested by: {}",
        submission.requester().display_name()
    ));
    lines.push(format!(
        "Approved by: {}",
        submission.approver().display_name()
    ));
    lines.join("\n")
}
