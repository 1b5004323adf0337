//! Submission requests and the pending submissions built from them.

use super::{DateField, Participant, SubmissionId, ValidationError, VersionRef};
use crate::dates::{self, DateComparison};
use crate::remote::domain::{ProjectId, VersionId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw input of a task submission, as entered by the requester.
///
/// Text fields are kept as entered; blank optional fields are treated as
/// absent when the submission is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTaskRequest {
    title: String,
    description: Option<String>,
    estimate: Option<String>,
    start_date: Option<String>,
    due_date: Option<String>,
    project: Option<(ProjectId, String)>,
    version: Option<VersionRef>,
    requester: Participant,
    approver: Participant,
    interaction_id: Option<String>,
}

impl SubmitTaskRequest {
    /// Creates a request with the required participants and title.
    #[must_use]
    pub fn new(title: impl Into<String>, requester: Participant, approver: Participant) -> Self {
        Self {
            title: title.into(),
            description: None,
            estimate: None,
            start_date: None,
            due_date: None,
            project: None,
            version: None,
            requester,
            approver,
            interaction_id: None,
        }
    }

    /// Sets the target project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId, project_name: impl Into<String>) -> Self {
        self.project = Some((project_id, project_name.into()));
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the estimate, in hours, as entered.
    #[must_use]
    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = Some(estimate.into());
        self
    }

    /// Sets the start date (`DD/MM/YYYY`).
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the due date (`DD/MM/YYYY`).
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the target version.
    #[must_use]
    pub fn with_version(mut self, version_id: VersionId, version_name: impl Into<String>) -> Self {
        self.version = Some(VersionRef::new(version_id, version_name));
        self
    }

    /// Sets the chat interaction that produced the request.
    #[must_use]
    pub fn with_interaction_id(mut self, interaction_id: impl Into<String>) -> Self {
        self.interaction_id = Some(interaction_id.into());
        self
    }

    /// Returns the identifier a submission from this request will carry.
    ///
    /// Derived from the requester and interaction when an interaction is set,
    /// random otherwise.
    #[must_use]
    pub fn submission_id(&self) -> SubmissionId {
        self.interaction_id.as_deref().map_or_else(SubmissionId::generate, |interaction| {
            SubmissionId::for_interaction(self.requester.id(), interaction)
        })
    }

    /// Returns the requester.
    #[must_use]
    pub const fn requester(&self) -> &Participant {
        &self.requester
    }

    /// Returns the chosen approver.
    #[must_use]
    pub const fn approver(&self) -> &Participant {
        &self.approver
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn check_date(field: DateField, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(text) if !dates::validate(Some(text)) => Err(ValidationError::InvalidDate {
            field,
            value: text.to_owned(),
        }),
        _ => Ok(()),
    }
}

/// A validated submission awaiting a decision.
///
/// Only [`PendingSubmission::new`] constructs one, so every instance has
/// passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSubmission {
    id: SubmissionId,
    title: String,
    description: Option<String>,
    estimate: Option<String>,
    start_date: Option<String>,
    due_date: Option<String>,
    project_id: Option<ProjectId>,
    project_name: String,
    version: Option<VersionRef>,
    requester: Participant,
    approver: Participant,
    submitted_at: DateTime<Utc>,
}

impl PendingSubmission {
    /// Validates a request and turns it into a pending submission.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first failing check, in this order:
    /// automated approver, missing project, missing title, malformed
    /// estimate, malformed start date, malformed due date, dates out of
    /// order.
    pub fn new(
        id: SubmissionId,
        request: SubmitTaskRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if request.approver.is_automated() {
            return Err(ValidationError::AutomatedApprover);
        }
        let Some((project_id, project_name)) = request.project else {
            return Err(ValidationError::MissingProject);
        };
        let title = request.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let estimate = non_blank(request.estimate);
        if let Some(raw) = estimate.as_deref()
            && !dates::is_numeric_estimate(raw)
        {
            return Err(ValidationError::InvalidEstimate(raw.to_owned()));
        }

        let start_date = non_blank(request.start_date);
        let due_date = non_blank(request.due_date);
        check_date(DateField::Start, start_date.as_deref())?;
        check_date(DateField::Due, due_date.as_deref())?;
        if dates::compare(start_date.as_deref(), due_date.as_deref())
            == DateComparison::EndBeforeStart
        {
            return Err(ValidationError::DatesOutOfOrder);
        }

        Ok(Self {
            id,
            title: title.to_owned(),
            description: non_blank(request.description),
            estimate,
            start_date,
            due_date,
            project_id: Some(project_id),
            project_name,
            version: request.version,
            requester: request.requester,
            approver: request.approver,
            submitted_at,
        })
    }

    /// Replaces the approver, recording who actually decided.
    #[must_use]
    pub fn with_approver(mut self, approver: Participant) -> Self {
        self.approver = approver;
        self
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> &SubmissionId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the estimate in hours, as entered.
    #[must_use]
    pub fn estimate(&self) -> Option<&str> {
        self.estimate.as_deref()
    }

    /// Returns the start date (`DD/MM/YYYY`).
    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    /// Returns the due date (`DD/MM/YYYY`).
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the project name shown to users.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Returns the target version.
    #[must_use]
    pub const fn version(&self) -> Option<&VersionRef> {
        self.version.as_ref()
    }

    /// Returns the requester.
    #[must_use]
    pub const fn requester(&self) -> &Participant {
        &self.requester
    }

    /// Returns the approver.
    #[must_use]
    pub const fn approver(&self) -> &Participant {
        &self.approver
    }

    /// Returns when the submission was registered.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

#[cfg(test)]
impl PendingSubmission {
    pub(crate) const fn without_project(mut self) -> Self {
        self.project_id = None;
        self
    }

    pub(crate) fn with_unchecked_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }
}
