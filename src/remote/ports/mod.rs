//! Port contracts for remote project API access.
//!
//! Ports define infrastructure-agnostic interfaces used by remote services
//! and by the approval coordinator.

pub mod api;

pub use api::{ProjectApi, RemoteApiError, RemoteApiResult};

#[cfg(test)]
pub use api::MockProjectApi;
