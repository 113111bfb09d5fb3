//! Devices — what a transition asks of each registered device, and what came back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The part a device plays in a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceRole {
    /// Main climate device (whole-house thermostat).
    PrimaryClimate,
    /// Secondary climate device (bedroom mini-split).
    SecondaryClimate,
    /// Switched outlet (lamps, heaters, …).
    Outlet,
}

/// A device as the domain sees it: a name, a role, and whether it is in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    pub name: String,
    pub role: DeviceRole,
    pub enabled: bool,
}

impl DeviceSpec {
    /// An enabled device.
    #[must_use]
    pub fn new(name: impl Into<String>, role: DeviceRole) -> Self {
        Self {
            name: name.into(),
            role,
            enabled: true,
        }
    }

    /// Check that a set of devices is usable together.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceName`] or
    /// [`ValidationError::DuplicateDeviceName`].
    pub fn validate_all(devices: &[Self]) -> Result<(), ValidationError> {
        let mut seen = std::collections::HashSet::new();
        for device in devices {
            if device.name.trim().is_empty() {
                return Err(ValidationError::EmptyDeviceName);
            }
            if !seen.insert(device.name.as_str()) {
                return Err(ValidationError::DuplicateDeviceName(device.name.clone()));
            }
        }
        Ok(())
    }
}

/// HVAC operating mode of a climate device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HvacMode {
    Heat,
    Cool,
    Auto,
    Eco,
    Off,
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heat => f.write_str("heat"),
            Self::Cool => f.write_str("cool"),
            Self::Auto => f.write_str("auto"),
            Self::Eco => f.write_str("eco"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// On/off state of a switched outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Target configuration of a climate device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateTarget {
    pub hvac: HvacMode,
    /// Setpoint in °F; `None` when the mode has no setpoint (off).
    pub setpoint_f: Option<f64>,
}

/// The single action a transition asks of one device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DeviceCommand {
    SetClimate(ClimateTarget),
    SetPower { state: PowerState },
}

impl DeviceCommand {
    /// Stable action name recorded in results and logs.
    #[must_use]
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::SetClimate(_) => "set_climate",
            Self::SetPower { .. } => "set_power",
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetClimate(ClimateTarget {
                hvac: HvacMode::Off,
                ..
            }) => f.write_str("off"),
            Self::SetClimate(ClimateTarget {
                hvac,
                setpoint_f: Some(setpoint),
            }) => match hvac {
                HvacMode::Eco => write!(f, "eco {}", format_temp(*setpoint)),
                _ => f.write_str(&format_temp(*setpoint)),
            },
            Self::SetClimate(ClimateTarget {
                hvac,
                setpoint_f: None,
            }) => hvac.fmt(f),
            Self::SetPower { state } => state.fmt(f),
        }
    }
}

/// Render a Fahrenheit temperature: whole degrees without decimals.
#[must_use]
pub fn format_temp(value: f64) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{value:.0}°F")
    } else {
        format!("{value:.1}°F")
    }
}

/// Classified cause of a failed device action, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    Auth,
    Unreachable,
    UnexpectedResponse,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::Auth => f.write_str("auth"),
            Self::Unreachable => f.write_str("unreachable"),
            Self::UnexpectedResponse => f.write_str("unexpected_response"),
            Self::Internal => f.write_str("internal"),
        }
    }
}

/// Outcome class of one device action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Ok,
    Failed,
    Skipped,
}

/// Outcome of applying a transition to one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceActionResult {
    pub device_name: String,
    pub action: String,
    pub status: ActionStatus,
    /// What was requested, rendered for humans (`70°F`, `off`).
    pub target: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub error_message: Option<String>,
    pub duration_ms: u64,
}

impl DeviceActionResult {
    /// The device accepted the command.
    #[must_use]
    pub fn ok(device_name: &str, command: &DeviceCommand, duration_ms: u64) -> Self {
        Self {
            device_name: device_name.to_string(),
            action: command.action_name().to_string(),
            status: ActionStatus::Ok,
            target: Some(command.to_string()),
            error_kind: None,
            error_message: None,
            duration_ms,
        }
    }

    /// The device call failed.
    #[must_use]
    pub fn failed(
        device_name: &str,
        command: &DeviceCommand,
        kind: ErrorKind,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            device_name: device_name.to_string(),
            action: command.action_name().to_string(),
            status: ActionStatus::Failed,
            target: Some(command.to_string()),
            error_kind: Some(kind),
            error_message: Some(message.into()),
            duration_ms,
        }
    }

    /// The device was not addressed by this transition.
    #[must_use]
    pub fn skipped(device_name: &str) -> Self {
        Self {
            device_name: device_name.to_string(),
            action: "none".to_string(),
            status: ActionStatus::Skipped,
            target: None,
            error_kind: None,
            error_message: None,
            duration_ms: 0,
        }
    }
}
