//! Mini-split controller — `POST /api/v1/control`.
//!
//! The unit has no native eco mode: eco maps to `auto` with the
//! controller's `econo` flag set.

use hearthmode_app::ports::DeviceError;
use hearthmode_domain::device::{ClimateTarget, DeviceCommand, HvacMode, PowerState};
use serde::Serialize;

use crate::endpoint::Endpoint;

#[derive(Debug, PartialEq, Serialize)]
struct ControlRequest {
    power: PowerState,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_f: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    econo: bool,
}

impl ControlRequest {
    fn power(power: PowerState) -> Self {
        Self {
            power,
            mode: None,
            target_f: None,
            econo: false,
        }
    }

    fn from_command(command: &DeviceCommand) -> Self {
        let (hvac, target_f) = match *command {
            DeviceCommand::SetPower { state } => return Self::power(state),
            DeviceCommand::SetClimate(ClimateTarget { hvac, setpoint_f }) => (hvac, setpoint_f),
        };
        let mode = match hvac {
            HvacMode::Off => return Self::power(PowerState::Off),
            HvacMode::Heat => "heat",
            HvacMode::Cool => "cool",
            HvacMode::Auto | HvacMode::Eco => "auto",
        };
        Self {
            power: PowerState::On,
            mode: Some(mode),
            target_f,
            econo: hvac == HvacMode::Eco,
        }
    }
}

/// Secondary climate device.
#[derive(Debug, Clone)]
pub struct MiniSplit {
    endpoint: Endpoint,
}

impl MiniSplit {
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// # Errors
    ///
    /// Returns the classified HTTP failure.
    pub async fn apply(&self, command: &DeviceCommand) -> Result<(), DeviceError> {
        let body = ControlRequest::from_command(command);
        Endpoint::send(self.endpoint.post("api/v1/control").json(&body)).await?;
        Ok(())
    }
}
