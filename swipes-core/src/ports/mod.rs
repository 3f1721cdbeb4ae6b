//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod session_store;
mod transport;

pub use session_store::SessionStore;
pub use transport::{Endpoint, Transport};
