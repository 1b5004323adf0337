//! Orchestration services for the approval workflow.

pub mod coordinator;

pub use coordinator::{
    ApprovalCoordinator, ApprovalError, ApprovalResult, Decision, DecisionOutcome,
};
