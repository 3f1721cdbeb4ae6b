//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON file on disk for the SessionStore port
//! - In-memory SessionStore for tests and ephemeral use
//! - reqwest HTTP client for the Transport port
//! - Mock GET services server for transport tests

pub mod file_store;
pub mod http;
pub mod memory_store;

#[cfg(test)]
pub mod cbord_mock;

pub use file_store::FileSessionStore;
pub use http::HttpTransport;
pub use memory_store::MemorySessionStore;
