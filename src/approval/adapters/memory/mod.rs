//! In-memory adapters.

pub mod notifier;
pub mod registry;

pub use notifier::{NotificationEvent, RecordingNotifier};
pub use registry::InMemoryPendingRegistry;
