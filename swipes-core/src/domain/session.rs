//! Session domain model

use serde::{Deserialize, Serialize};

/// Which kind of session id is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Minted from the fixed system credentials; only good for institution lookup
    Temporary,
    /// Obtained through the institution's browser login
    User,
}

/// The active session, persisted as a single record
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub kind: SessionKind,
}

impl Session {
    pub fn temporary(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SessionKind::Temporary,
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SessionKind::User,
        }
    }

    pub fn is_temporary(&self) -> bool {
        self.kind == SessionKind::Temporary
    }
}

// Session ids are bearer credentials, keep them out of debug output and logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &"<redacted>")
            .field("kind", &self.kind)
            .finish()
    }
}
