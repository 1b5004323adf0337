//! Taskgate: approval-gated task submission for a remote project API.
//!
//! This crate mediates task-creation requests from end users to a remote
//! project-management API. Every request waits in an in-memory registry until
//! a human approver decides on it; only approved requests reach the remote
//! create-task endpoint.
//!
//! # Architecture
//!
//! Taskgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory, logging)
//!
//! # Modules
//!
//! - [`approval`]: Pending submissions, decisions, and the approval coordinator
//! - [`remote`]: Remote project API access and the project/version cache
//! - [`dates`]: Calendar date and duration conversion for submission fields
//! - [`config`]: Layered startup configuration
//! - [`bootstrap`]: Wiring of the process-wide services from configuration
//! - [`pagination`]: Paged views over cached listings
//! - [`telemetry`]: Tracing subscriber installation

pub mod approval;
pub mod bootstrap;
pub mod config;
pub mod dates;
pub mod pagination;
pub mod remote;
pub mod telemetry;

#[cfg(test)]
mod test_support;
