//! HTTP-specific error type and its mapping onto the port errors.

use hearthmode_app::ports::{DeviceError, NotifyError, WeatherError};
use reqwest::StatusCode;

/// Errors originating from the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request failed before a usable response arrived.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl HttpError {
    /// Turn a non-success response into [`HttpError::Status`].
    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::Status { status, body })
    }
}

impl From<HttpError> for DeviceError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Build(error) => Self::Internal(error.to_string()),
            HttpError::Request(error) if error.is_timeout() => Self::Timeout,
            HttpError::Request(error) if error.is_decode() || error.is_body() => {
                Self::UnexpectedResponse(error.to_string())
            }
            HttpError::Request(error) => Self::Unreachable(error.to_string()),
            HttpError::Status { status, .. }
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Self::Auth {
                    status: status.as_u16(),
                }
            }
            HttpError::Status { status, .. } => Self::UnexpectedResponse(format!("HTTP {status}")),
        }
    }
}

impl From<HttpError> for WeatherError {
    fn from(err: HttpError) -> Self {
        Self::Request(err.to_string())
    }
}

impl From<HttpError> for NotifyError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, .. } => Self::Rejected(status.as_u16()),
            other => Self::Request(other.to_string()),
        }
    }
}
