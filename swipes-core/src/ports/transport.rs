//! Transport port
//!
//! Posts a request envelope to one of the services API endpoints and hands
//! back the decoded JSON body. Transports know nothing about the
//! `{exception, response}` convention; that is unwrapped by the caller.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::result::Result;
use crate::domain::RequestEnvelope;

/// Services API endpoint paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Accounts and transaction history
    Commerce,
    /// User profile
    User,
    /// Institution lookup
    Institution,
    /// System authentication (temporary sessions)
    Session,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Commerce => "commerce",
            Endpoint::User => "user",
            Endpoint::Institution => "institution",
            Endpoint::Session => "session",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// HTTP transport trait
///
/// Non-2xx statuses, timeouts, connection failures and non-JSON bodies
/// must all be reported as `Error::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, endpoint: Endpoint, body: &RequestEnvelope) -> Result<JsonValue>;
}
