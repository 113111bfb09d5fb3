//! Notifier port — outbound human notifications.

use std::fmt;
use std::future::Future;

/// Delivery priority of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Normal,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::High => f.write_str("high"),
        }
    }
}

/// Errors from the notification service. Logged, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Request(String),

    #[error("notification rejected with HTTP {0}")]
    Rejected(u16),
}

/// Sends one message to the household.
pub trait Notifier: Send + Sync {
    fn send(
        &self,
        message: &str,
        priority: Priority,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
