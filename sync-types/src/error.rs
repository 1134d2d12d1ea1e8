//! Error payload returned by the recipe API.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// An explicit error reported by the recipe API.
///
/// The server encodes `status` and `code` inconsistently (a number in one
/// field, a status text in the other), so both are kept as strings and
/// accept either JSON type on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{status} ({code}): {message}")]
pub struct ApiError {
    /// HTTP status, as sent by the server.
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    /// Application error code.
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    /// Human-readable message.
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

impl ApiError {
    /// Create an error payload from its parts.
    pub fn new(status: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Short title used when surfacing the error, e.g. `500 (X)`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.status, self.code)
    }
}

/// Envelope wrapping an [`ApiError`]: `{ "error": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The error payload.
    pub error: ApiError,
}

/// Accept a string, number, bool or null and keep its textual form.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_display() {
        let err = ApiError::new("500", "X", "boom");
        assert_eq!(err.to_string(), "500 (X): boom");
        assert_eq!(err.title(), "500 (X)");
    }

    #[test]
    fn numeric_status_and_code_are_accepted() {
        let body: ErrorBody = serde_json::from_value(json!({
            "error": { "status": 500, "code": "X", "message": "boom" }
        }))
        .unwrap();
        assert_eq!(body.error, ApiError::new("500", "X", "boom"));

        let server_shape: ErrorBody = serde_json::from_value(json!({
            "error": { "code": 404, "status": "Not Found", "message": "no recipe" }
        }))
        .unwrap();
        assert_eq!(server_shape.error.title(), "Not Found (404)");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let body: ErrorBody = serde_json::from_value(json!({ "error": {} })).unwrap();
        assert_eq!(body.error, ApiError::default());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
