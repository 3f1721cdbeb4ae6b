//! Session store port
//!
//! Durable storage for the single active session. The id and its kind are
//! one record: implementations must never expose a kind without an id.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::Session;

/// Persistent session storage trait
///
/// Failures are storage-layer only and surface as `Error::Storage`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the active session, `None` when there is none
    async fn get(&self) -> Result<Option<Session>>;

    /// Replace the active session wholesale
    async fn put(&self, session: &Session) -> Result<()>;

    /// Remove the active session (id and kind together)
    async fn clear(&self) -> Result<()>;
}
