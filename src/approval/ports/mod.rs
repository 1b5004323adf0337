//! Port contracts for the approval workflow.

pub mod notifier;
pub mod registry;

#[cfg(test)]
pub use notifier::MockApprovalNotifier;
pub use notifier::{ApprovalNotifier, NotifierError, NotifierResult};
#[cfg(test)]
pub use registry::MockPendingTaskRegistry;
pub use registry::{PendingTaskRegistry, RegistryError, RegistryResult};
