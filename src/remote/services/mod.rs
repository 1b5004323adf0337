//! Remote data services.

pub mod cache;

pub use cache::{DEFAULT_CACHE_DURATION, DEFAULT_PAGE_SIZE, ProjectCache};
