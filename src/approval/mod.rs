//! Approval-gated task submissions.
//!
//! A requester submits a task; the submission waits in the pending registry
//! until its approver approves or rejects it. Approval creates the remote
//! task. Either decision resolves the submission exactly once. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
