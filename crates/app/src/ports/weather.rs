//! Weather port — current outdoor temperature.

use std::future::Future;

/// Errors from the weather service.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(String),

    #[error("weather response missing temperature")]
    MissingTemperature,
}

/// Provides the current outdoor temperature.
pub trait WeatherProvider: Send + Sync {
    /// Current outdoor temperature in °F.
    fn current_temperature_f(&self) -> impl Future<Output = Result<f64, WeatherError>> + Send;
}
