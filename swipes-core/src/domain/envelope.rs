//! Request and response envelopes
//!
//! Every call to the services API posts `{method, params}` and receives
//! `{exception, response}` back. Exactly one of the two response fields is
//! populated on a well-behaved backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::result::{Error, Result};

/// Parameter key carrying the session id
pub const SESSION_ID_PARAM: &str = "sessionId";

/// Request body for one remote method call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    pub method: String,
    pub params: Map<String, JsonValue>,
}

impl RequestEnvelope {
    /// Build an envelope from a method name and optional params
    ///
    /// Params that do not serialize to a JSON object are rejected.
    pub fn new<P: Serialize>(method: impl Into<String>, params: Option<&P>) -> Result<Self> {
        let params = match params {
            None => Map::new(),
            Some(p) => match serde_json::to_value(p) {
                Ok(JsonValue::Object(map)) => map,
                Ok(JsonValue::Null) => Map::new(),
                Ok(other) => {
                    return Err(Error::validation(format!(
                        "request params must be a JSON object, got {}",
                        other
                    )))
                }
                Err(e) => return Err(Error::validation(format!("unserializable params: {}", e))),
            },
        };

        Ok(Self {
            method: method.into(),
            params,
        })
    }

    /// Set `params.sessionId`, replacing any caller-supplied value
    pub fn with_session_id(mut self, session_id: &str) -> Self {
        self.params.insert(
            SESSION_ID_PARAM.to_string(),
            JsonValue::String(session_id.to_string()),
        );
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.params.get(SESSION_ID_PARAM).and_then(|v| v.as_str())
    }
}

/// Response body for one remote method call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvelopeResponse<T> {
    pub exception: Option<String>,
    pub response: Option<T>,
}

impl<T> EnvelopeResponse<T> {
    /// Unwrap the payload
    ///
    /// A populated `exception` is a `Backend` error carrying the message
    /// verbatim. No exception and no payload is a `MalformedResponse`.
    pub fn into_result(self) -> Result<T> {
        match (self.exception, self.response) {
            (Some(exception), _) => Err(Error::Backend(exception)),
            (None, Some(response)) => Ok(response),
            (None, None) => Err(Error::malformed(
                "response envelope has neither an exception nor a payload",
            )),
        }
    }
}

/// Unwrap a raw JSON body and decode the payload as `T`
///
/// Bodies that are not envelope-shaped, and payloads that do not decode,
/// are `MalformedResponse`.
pub fn unwrap_response<T: DeserializeOwned>(body: JsonValue) -> Result<T> {
    let envelope: EnvelopeResponse<JsonValue> = serde_json::from_value(body)
        .map_err(|e| Error::malformed(format!("not a response envelope: {}", e)))?;

    let payload = envelope.into_result()?;

    serde_json::from_value(payload)
        .map_err(|e| Error::malformed(format!("unexpected payload shape: {}", e)))
}
