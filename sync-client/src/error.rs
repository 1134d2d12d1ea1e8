//! Client errors.
//!
//! Every failure an action can hit falls in one of three kinds. Actions
//! never return these to their caller; they are turned into
//! [`Notification`]s at the action boundary.

use sync_core::Notification;
use sync_types::ApiError;
use thiserror::Error;

use crate::transport::TransportError;

/// Client errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The server answered with an explicit error payload.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The server could not be reached, or its answer could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The action was rejected before any request was made.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl ClientError {
    /// Error notification describing this failure.
    ///
    /// API errors use `"{status} ({code})"` as title and the server message
    /// as body. Unreadable answers are titled apart from network failures.
    pub fn to_notification(&self) -> Notification {
        match self {
            Self::Api(err) => Notification::error(err.title(), err.message.clone()),
            Self::Transport(TransportError::InvalidBody(reason)) => {
                Notification::error("Invalid response", reason.clone())
            }
            Self::Transport(err) => Notification::error("Network error", err.to_string()),
            Self::Precondition(reason) => Notification::error("Invalid request", reason.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_core::NotificationKind;

    #[test]
    fn api_error_notification_carries_status_and_code() {
        let err = ClientError::from(ApiError::new("500", "X", "boom"));
        let n = err.to_notification();
        assert_eq!(n.kind, NotificationKind::Error);
        assert!(n.title.contains("500"));
        assert!(n.title.contains("X"));
        assert_eq!(n.message, "boom");
    }

    #[test]
    fn transport_and_precondition_notifications() {
        let n = ClientError::from(TransportError::Timeout).to_notification();
        assert_eq!(n.title, "Network error");
        assert_eq!(n.message, "request timed out");

        let n = ClientError::from(TransportError::InvalidBody("no recipe id".into()))
            .to_notification();
        assert_eq!(n.title, "Invalid response");
        assert_eq!(n.message, "no recipe id");

        let n = ClientError::Precondition("url must not be empty".into()).to_notification();
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.message, "url must not be empty");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientError>();
    }
}
