//! Notification messages surfaced to the UI.
//!
//! A closed set of kinds, each with presentation hints the UI may use.
//! The core never looks at the hints.

use std::fmt;

/// Kind of a transient user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// An action failed.
    Error,
    /// Neutral information.
    Info,
    /// An action completed.
    Success,
    /// Something needs attention but nothing failed.
    Warning,
}

impl NotificationKind {
    /// Suggested display color.
    pub fn color(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }

    /// Suggested icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "mdi-alert-circle",
            Self::Info => "mdi-information",
            Self::Success => "mdi-check-circle",
            Self::Warning => "mdi-alert",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("ERROR"),
            Self::Info => f.write_str("INFO"),
            Self::Success => f.write_str("SUCCESS"),
            Self::Warning => f.write_str("WARNING"),
        }
    }
}

/// A message published on the notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Kind of message.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Details.
    pub message: String,
}

impl Notification {
    /// Create a notification.
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`NotificationKind::Error`] notification.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    /// Shorthand for a [`NotificationKind::Success`] notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.title, self.message)
    }
}
