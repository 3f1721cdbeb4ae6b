//! GET services HTTP transport
//!
//! Posts JSON envelopes to `{base_url}/{endpoint}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::RequestEnvelope;
use crate::ports::{Endpoint, Transport};

/// Default production API URL
pub const CBORD_PRODUCTION_URL: &str = "https://services.get.cbord.com/GETServices/services/json";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Transport against `base_url` (production, staging, mock servers)
    pub fn new_with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid services base URL {:?}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "services base URL must be http(s), got {:?}",
                parsed.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs_f32()
            ))
        } else if error.is_connect() {
            Error::transport("Unable to connect to GET services")
        } else {
            Error::transport(format!("GET services request failed: {}", error))
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        match status.as_u16() {
            429 => Err(Error::transport("GET services rate limit exceeded (HTTP 429)")),
            code if status.is_server_error() => {
                Err(Error::transport(format!("GET services unavailable: HTTP {}", code)))
            }
            code => Err(Error::transport(format!("GET services API error: HTTP {}", code))),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, endpoint: Endpoint, body: &RequestEnvelope) -> Result<JsonValue> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%endpoint, method = %body.method, "posting request envelope");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%endpoint, error = %e, "response body is not JSON");
            Error::transport(format!("GET services returned a non-JSON body: {}", e))
        })
    }
}
