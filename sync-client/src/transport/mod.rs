//! Transport abstraction for recipe-sync.
//!
//! This module provides a pluggable transport layer that abstracts the
//! underlying HTTP mechanism (reqwest, mock for testing).
//!
//! # Design
//!
//! A transport only moves bytes: it sends one [`Request`] and hands back the
//! status and the raw body text. Interpreting the body (JSON parsing,
//! detecting error payloads) is the job of the
//! [`Gateway`](crate::gateway::Gateway), so every transport reports API-level
//! failures the same way.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.queue_json(200, json!({ "categories": ["soup"] }));
//! let response = transport.send(Request::get("http://host/api/v1/categories")).await?;
//! ```

mod http;
mod mock;

pub use http::HttpTransport;
pub use mock::{MockTransport, Release};

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The server could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The request failed for another reason.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be read or decoded.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST with a JSON body
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// JSON body, for POST.
    pub body: Option<Value>,
}

impl Request {
    /// A GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    /// A POST request with a JSON body.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// A response as received, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl Response {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for issuing requests to the recipe API.
///
/// Implementations handle the underlying connection mechanism
/// (reqwest, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response.
    ///
    /// Non-2xx statuses are NOT errors at this level; only failures to get
    /// a response at all are.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (**self).send(request).await
    }
}
