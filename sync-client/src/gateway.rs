//! HTTP gateway to the recipe API.
//!
//! The gateway builds absolute URLs from the configured base, sends requests
//! through a [`Transport`], and normalizes every answer into a `Result`:
//!
//! - a body carrying an `error` key, or a non-2xx status, is
//!   [`ClientError::Api`] with the server's `{status, code, message}`;
//! - an unreachable server or unreadable success body is
//!   [`ClientError::Transport`].
//!
//! ```text
//! Store action → Gateway → Transport → Network
//!                   ↓
//!          Result<T, ClientError>
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sync_core::ApiBase;
use sync_types::ApiError;

use crate::error::ClientError;
use crate::transport::{Method, Request, Response, Transport, TransportError};

/// Gateway to the recipe API.
pub struct Gateway<T: Transport> {
    base: ApiBase,
    transport: T,
}

impl<T: Transport> Gateway<T> {
    /// Create a gateway for the API at `base`.
    pub fn new(base: ApiBase, transport: T) -> Self {
        Self { base, transport }
    }

    /// The configured base.
    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// Absolute URL of an endpoint.
    pub fn build_url(&self, endpoint: &str) -> String {
        self.base.build_url(endpoint)
    }

    /// Get the transport (for testing).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and normalize the answer to its JSON body.
    pub async fn request(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        tracing::debug!(%method, %url, "sending request");
        let response = self
            .transport
            .send(Request { method, url, body })
            .await?;
        tracing::debug!(status = response.status, "received response");
        normalize(response)
    }

    /// `GET` an endpoint and decode its body.
    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ClientError> {
        let value = self
            .request(Method::Get, self.build_url(endpoint), None)
            .await?;
        decode(value)
    }

    /// `POST` a JSON body to an endpoint and decode the answer.
    pub async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::Precondition(format!("request body cannot be encoded: {e}")))?;
        let value = self
            .request(Method::Post, self.build_url(endpoint), Some(body))
            .await?;
        decode(value)
    }
}

/// Turn a raw response into the parsed body or an error.
pub fn normalize(response: Response) -> Result<Value, ClientError> {
    let success = response.is_success();

    match serde_json::from_str::<Value>(&response.body) {
        Ok(value) => {
            if let Some(error) = value.get("error") {
                return Err(api_error(error, response.status).into());
            }
            if !success {
                return Err(ApiError::new(
                    response.status.to_string(),
                    reason(response.status),
                    value.to_string(),
                )
                .into());
            }
            Ok(value)
        }
        Err(e) if success => Err(TransportError::InvalidBody(e.to_string()).into()),
        Err(_) => Err(ApiError::new(
            response.status.to_string(),
            reason(response.status),
            response.body.trim(),
        )
        .into()),
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ClientError> {
    serde_json::from_value(value).map_err(|e| TransportError::InvalidBody(e.to_string()).into())
}

/// Read an `error` payload, filling gaps from the HTTP status.
fn api_error(error: &Value, status: u16) -> ApiError {
    let mut err = match error {
        Value::Object(_) => serde_json::from_value(error.clone()).unwrap_or_default(),
        Value::String(message) => ApiError::new("", "", message.clone()),
        other => ApiError::new("", "", other.to_string()),
    };
    if err.status.is_empty() {
        err.status = status.to_string();
    }
    if err.code.is_empty() {
        err.code = reason(status);
    }
    err
}

fn reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}
