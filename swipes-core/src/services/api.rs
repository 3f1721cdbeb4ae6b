//! Envelope client - the one path every backend call takes
//!
//! build envelope (attaching the active session id) -> transport -> unwrap.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::envelope::unwrap_response;
use crate::domain::result::{Error, Result};
use crate::domain::RequestEnvelope;
use crate::ports::{Endpoint, SessionStore, Transport};

/// Placeholder for calls that take no parameters
pub const NO_PARAMS: Option<&'static JsonValue> = None;

/// Whether to put the active session id into `params.sessionId`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Attach the stored session id (the default for every call)
    Attach,
    /// Send no session id; only for minting the first temporary session
    Omit,
}

/// Client for the services API envelope convention
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn SessionStore>) -> Self {
        Self { transport, store }
    }

    /// Build the request envelope for `method`
    ///
    /// With `SessionMode::Attach` and no stored session the envelope is
    /// still built, just without `sessionId`; the backend decides what that
    /// means.
    pub async fn build_envelope<P>(
        &self,
        method: &str,
        params: Option<&P>,
        mode: SessionMode,
    ) -> Result<RequestEnvelope>
    where
        P: Serialize + Sync,
    {
        let envelope = RequestEnvelope::new(method, params)?;

        match mode {
            SessionMode::Omit => Ok(envelope),
            SessionMode::Attach => match self.store.get().await? {
                Some(session) => Ok(envelope.with_session_id(&session.id)),
                None => {
                    tracing::warn!(method, "no active session, sending request without sessionId");
                    Ok(envelope)
                }
            },
        }
    }

    /// Call `method` on `endpoint` and decode the unwrapped payload as `T`
    pub async fn call<T, P>(
        &self,
        endpoint: Endpoint,
        method: &str,
        params: Option<&P>,
        mode: SessionMode,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + Sync,
    {
        let envelope = self.build_envelope(method, params, mode).await?;
        let body = self.transport.post(endpoint, &envelope).await?;

        unwrap_response(body).map_err(|e| {
            match &e {
                Error::Backend(exception) => {
                    tracing::warn!(%endpoint, method, exception = %exception, "backend reported an exception")
                }
                Error::MalformedResponse(reason) => {
                    tracing::warn!(%endpoint, method, reason = %reason, "backend broke the response contract")
                }
                _ => {}
            }
            e
        })
    }
}
