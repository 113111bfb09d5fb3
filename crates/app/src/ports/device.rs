//! Device port — the one capability every controllable device offers.
//!
//! Thermostats, mini-splits and outlets are thin authenticated HTTP
//! wrappers. The coordinator only needs "apply this command", so that is
//! all the port asks for.

use std::future::Future;

use hearthmode_domain::device::{DeviceCommand, ErrorKind};

/// Errors a device client can report.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The call did not complete within its deadline.
    #[error("request timed out")]
    Timeout,

    /// The device rejected our credentials.
    #[error("authentication rejected (HTTP {status})")]
    Auth { status: u16 },

    /// The device could not be reached (DNS, connect, reset).
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// The device answered, but not with anything we understand.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The device kind cannot carry out this command.
    #[error("command {command} is not supported by this device")]
    Unsupported { command: &'static str },

    /// The client itself broke (panicked task, bad request construction).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DeviceError {
    /// Classification recorded in results and notifications.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout => ErrorKind::Timeout,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Unreachable(_) => ErrorKind::Unreachable,
            Self::UnexpectedResponse(_) | Self::Unsupported { .. } => {
                ErrorKind::UnexpectedResponse
            }
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// A controllable device.
///
/// Implementations must be idempotent: applying "off" to an outlet that is
/// already off succeeds.
pub trait DeviceClient: Send + Sync {
    /// Drive the device to the commanded state.
    fn apply(
        &self,
        command: &DeviceCommand,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;
}
