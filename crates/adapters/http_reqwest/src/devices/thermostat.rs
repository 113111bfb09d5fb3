//! Thermostat — `PUT /api/v1/thermostat` with the target mode and setpoint.

use hearthmode_app::ports::DeviceError;
use hearthmode_domain::device::{ClimateTarget, DeviceCommand, HvacMode};
use serde::Serialize;

use crate::endpoint::Endpoint;

#[derive(Debug, Serialize)]
struct ThermostatRequest {
    hvac_mode: HvacMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    setpoint_f: Option<f64>,
}

/// Primary climate device.
#[derive(Debug, Clone)]
pub struct Thermostat {
    endpoint: Endpoint,
}

impl Thermostat {
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Set mode and setpoint; `off` sends no setpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unsupported`] for power commands, otherwise
    /// the classified HTTP failure.
    pub async fn apply(&self, command: &DeviceCommand) -> Result<(), DeviceError> {
        let DeviceCommand::SetClimate(ClimateTarget { hvac, setpoint_f }) = *command else {
            return Err(DeviceError::Unsupported {
                command: command.action_name(),
            });
        };
        let body = ThermostatRequest {
            hvac_mode: hvac,
            setpoint_f: if hvac == HvacMode::Off { None } else { setpoint_f },
        };
        Endpoint::send(self.endpoint.put("api/v1/thermostat").json(&body)).await?;
        Ok(())
    }
}
