//! Adapters for approval ports.

pub mod logging;
pub mod memory;

pub use logging::TracingNotifier;
