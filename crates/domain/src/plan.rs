//! Plan — resolving a [`Mode`] into one command per registered device.
//!
//! | Mode | Primary climate | Secondary climate | Outlets |
//! |------|-----------------|-------------------|---------|
//! | `wake` | comfort | comfort | untouched |
//! | `sleep` | eco (sleep primary) | night (sleep secondary) | off |
//! | `away` | eco (away) | eco (away) | off |
//! | `home` | as `sleep` during sleep hours, else as `wake` | same | untouched |

use crate::device::{ClimateTarget, DeviceCommand, DeviceRole, DeviceSpec, HvacMode, PowerState};
use crate::mode::Mode;
use crate::setpoint::Setpoints;

/// Which climate targets a mode resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateProfile {
    Comfort,
    Night,
    Away,
}

impl ClimateProfile {
    /// Profile for `mode`; `home` depends on whether it is currently sleep hours.
    #[must_use]
    pub fn for_mode(mode: Mode, in_sleep_hours: bool) -> Self {
        match mode {
            Mode::Wake => Self::Comfort,
            Mode::Sleep => Self::Night,
            Mode::Away => Self::Away,
            Mode::Home if in_sleep_hours => Self::Night,
            Mode::Home => Self::Comfort,
        }
    }
}

/// One device and what to send it; `None` means the device is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAction {
    pub device: String,
    pub command: Option<DeviceCommand>,
}

/// The resolved per-device commands of a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub mode: Mode,
    pub profile: ClimateProfile,
    pub actions: Vec<PlannedAction>,
}

impl Plan {
    /// Resolve `mode` against the registered devices.
    ///
    /// `comfort_f` is the comfort setpoint after any weather adjustment.
    #[must_use]
    pub fn resolve(
        mode: Mode,
        in_sleep_hours: bool,
        devices: &[DeviceSpec],
        setpoints: &Setpoints,
        comfort_f: f64,
    ) -> Self {
        let profile = ClimateProfile::for_mode(mode, in_sleep_hours);
        let actions = devices
            .iter()
            .map(|device| PlannedAction {
                device: device.name.clone(),
                command: if device.enabled {
                    command_for(mode, profile, device.role, setpoints, comfort_f)
                } else {
                    None
                },
            })
            .collect();
        Self {
            mode,
            profile,
            actions,
        }
    }
}

fn climate(hvac: HvacMode, setpoint_f: f64) -> Option<DeviceCommand> {
    Some(DeviceCommand::SetClimate(ClimateTarget {
        hvac,
        setpoint_f: Some(setpoint_f),
    }))
}

fn command_for(
    mode: Mode,
    profile: ClimateProfile,
    role: DeviceRole,
    setpoints: &Setpoints,
    comfort_f: f64,
) -> Option<DeviceCommand> {
    match (role, profile) {
        (DeviceRole::PrimaryClimate | DeviceRole::SecondaryClimate, ClimateProfile::Comfort) => {
            climate(HvacMode::Auto, comfort_f)
        }
        (DeviceRole::PrimaryClimate, ClimateProfile::Night) => {
            climate(HvacMode::Eco, setpoints.sleep_primary_f)
        }
        (DeviceRole::SecondaryClimate, ClimateProfile::Night) => {
            climate(HvacMode::Auto, setpoints.sleep_secondary_f)
        }
        (DeviceRole::PrimaryClimate | DeviceRole::SecondaryClimate, ClimateProfile::Away) => {
            climate(HvacMode::Eco, setpoints.away_f)
        }
        // Arrival leaves outlets as the occupant left them.
        (DeviceRole::Outlet, _) => match mode {
            Mode::Sleep | Mode::Away => Some(DeviceCommand::SetPower {
                state: PowerState::Off,
            }),
            Mode::Wake | Mode::Home => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices() -> Vec<DeviceSpec> {
        vec![
            DeviceSpec::new("thermostat", DeviceRole::PrimaryClimate),
            DeviceSpec::new("mini-split", DeviceRole::SecondaryClimate),
            DeviceSpec::new("lamp", DeviceRole::Outlet),
        ]
    }

    fn commands(plan: &Plan) -> Vec<Option<String>> {
        plan.actions
            .iter()
            .map(|a| a.command.map(|c| c.to_string()))
            .collect()
    }

    #[test]
    fn should_apply_comfort_to_both_climate_devices_on_wake() {
        let plan = Plan::resolve(Mode::Wake, false, &devices(), &Setpoints::default(), 72.0);
        assert_eq!(plan.profile, ClimateProfile::Comfort);
        assert_eq!(
            commands(&plan),
            vec![Some("72°F".to_string()), Some("72°F".to_string()), None]
        );
    }

    #[test]
    fn should_apply_night_targets_and_switch_outlets_off_on_sleep() {
        let plan = Plan::resolve(Mode::Sleep, false, &devices(), &Setpoints::default(), 70.0);
        assert_eq!(
            commands(&plan),
            vec![
                Some("eco 62°F".to_string()),
                Some("66°F".to_string()),
                Some("off".to_string())
            ]
        );
    }

    #[test]
    fn should_apply_eco_and_switch_outlets_off_when_away() {
        let plan = Plan::resolve(Mode::Away, false, &devices(), &Setpoints::default(), 70.0);
        assert_eq!(
            commands(&plan),
            vec![
                Some("eco 58°F".to_string()),
                Some("eco 58°F".to_string()),
                Some("off".to_string())
            ]
        );
    }

    #[test]
    fn should_use_sleep_climate_when_arriving_during_sleep_hours() {
        let plan = Plan::resolve(Mode::Home, true, &devices(), &Setpoints::default(), 70.0);
        assert_eq!(plan.profile, ClimateProfile::Night);
        assert_eq!(
            commands(&plan),
            vec![Some("eco 62°F".to_string()), Some("66°F".to_string()), None]
        );
    }

    #[test]
    fn should_use_comfort_climate_when_arriving_during_the_day() {
        let plan = Plan::resolve(Mode::Home, false, &devices(), &Setpoints::default(), 70.0);
        assert_eq!(plan.profile, ClimateProfile::Comfort);
        assert_eq!(
            commands(&plan),
            vec![Some("70°F".to_string()), Some("70°F".to_string()), None]
        );
    }

    #[test]
    fn should_skip_disabled_devices() {
        let mut devices = devices();
        devices[0].enabled = false;
        let plan = Plan::resolve(Mode::Away, false, &devices, &Setpoints::default(), 70.0);
        assert!(plan.actions[0].command.is_none());
        assert!(plan.actions[1].command.is_some());
    }
}
