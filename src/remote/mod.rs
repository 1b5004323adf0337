//! Remote project API access for Taskgate.
//!
//! This module covers everything that talks to the remote project-management
//! system: listing projects and versions, creating tasks, and the read-through
//! cache that keeps listings fresh for one cache window. The module follows
//! hexagonal architecture:
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
