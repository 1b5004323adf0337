//! Remote API adapters.

pub mod http;
pub mod memory;

pub use http::HttpProjectApi;
pub use memory::InMemoryProjectApi;
