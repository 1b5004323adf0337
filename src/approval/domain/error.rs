//! Validation errors for submissions and decisions.

use std::fmt;
use thiserror::Error;

/// Which date field of a submission is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    /// The requested start date.
    Start,
    /// The requested due date.
    Due,
}

impl DateField {
    /// Returns the field label used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start date",
            Self::Due => "due date",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local, recoverable input errors.
///
/// A validation error never reaches the network and never changes registry
/// state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No project was selected.
    #[error("missing project")]
    MissingProject,

    /// The title is absent or blank.
    #[error("missing title")]
    MissingTitle,

    /// A date is not a real `DD/MM/YYYY` calendar date.
    #[error("invalid {field} '{value}', expected DD/MM/YYYY")]
    InvalidDate {
        /// The offending field.
        field: DateField,
        /// The value as entered.
        value: String,
    },

    /// The due date falls before the start date.
    #[error("end date precedes start date")]
    DatesOutOfOrder,

    /// The estimate is not a plain non-negative number of hours.
    #[error("invalid estimate '{0}', expected a number of hours")]
    InvalidEstimate(String),

    /// A rejection was submitted without a reason.
    #[error("a rejection requires a non-empty reason")]
    MissingRejectReason,

    /// The chosen approver is an automated account.
    #[error("automated accounts cannot approve submissions")]
    AutomatedApprover,
}
