//! Household operating modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named household operating mode a transition applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Occupants are awake: comfort setpoints.
    Wake,
    /// Occupants are asleep: eco/night setpoints, outlets off.
    Sleep,
    /// Nobody home: eco setpoints, outlets off.
    Away,
    /// Someone arrived: wake or sleep climate depending on the hour.
    Home,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 4] = [Self::Wake, Self::Sleep, Self::Away, Self::Home];

    /// Human-facing label used in notifications.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Wake => "Comfort mode",
            Self::Sleep => "Sleep mode",
            Self::Away => "Away mode",
            Self::Home => "Welcome home",
        }
    }

    /// Machine name (`wake`, `sleep`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wake => "wake",
            Self::Sleep => "sleep",
            Self::Away => "away",
            Self::Home => "home",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownMode(s.to_string()))
    }
}

/// The modes the time-based scheduler is allowed to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleKind {
    Wake,
    Sleep,
}

impl ScheduleKind {
    /// The mode this scheduled transition applies.
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::Wake => Mode::Wake,
            Self::Sleep => Mode::Sleep,
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.mode().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_mode_case_insensitively() {
        assert_eq!("Wake".parse::<Mode>().unwrap(), Mode::Wake);
        assert_eq!(" away ".parse::<Mode>().unwrap(), Mode::Away);
    }

    #[test]
    fn should_reject_unknown_mode() {
        let err = "party".parse::<Mode>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownMode("party".to_string()));
    }

    #[test]
    fn should_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Home).unwrap(), "\"home\"");
    }

    #[test]
    fn should_map_schedule_kind_to_mode() {
        assert_eq!(ScheduleKind::Wake.mode(), Mode::Wake);
        assert_eq!(ScheduleKind::Sleep.mode(), Mode::Sleep);
        assert_eq!(ScheduleKind::Sleep.to_string(), "sleep");
    }
}
