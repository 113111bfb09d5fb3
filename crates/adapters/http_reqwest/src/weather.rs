//! Outdoor temperature from an Open-Meteo compatible forecast API.

use hearthmode_app::ports::{WeatherError, WeatherProvider};
use serde::Deserialize;

use crate::endpoint::Endpoint;

/// Public Open-Meteo API.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

#[derive(Debug, Deserialize)]
struct Forecast {
    current: Option<Current>,
}

#[derive(Debug, Deserialize)]
struct Current {
    temperature_2m: Option<f64>,
}

pub struct OpenMeteoWeather {
    endpoint: Endpoint,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoWeather {
    #[must_use]
    pub fn new(endpoint: Endpoint, latitude: f64, longitude: f64) -> Self {
        Self {
            endpoint,
            latitude,
            longitude,
        }
    }
}

impl WeatherProvider for OpenMeteoWeather {
    async fn current_temperature_f(&self) -> Result<f64, WeatherError> {
        let request = self.endpoint.get("v1/forecast").query(&[
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("current", "temperature_2m".to_string()),
            ("temperature_unit", "fahrenheit".to_string()),
        ]);
        let response = Endpoint::send(request).await?;
        let forecast: Forecast = response
            .json()
            .await
            .map_err(|err| WeatherError::Request(err.to_string()))?;

        let temperature = forecast
            .current
            .and_then(|current| current.temperature_2m)
            .ok_or(WeatherError::MissingTemperature)?;
        tracing::debug!(outdoor_f = temperature, "weather reading");
        Ok(temperature)
    }
}
