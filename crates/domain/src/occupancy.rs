//! Occupancy — debounced presence state.
//!
//! A single network probe is a noisy signal: phones sleep their radios and
//! access points drop idle clients. The confirmed [`OccupancyStatus`] only
//! flips once `threshold` consecutive probes disagree with it.
//!
//! ```text
//!            contrary probe (count < threshold)
//!          ┌──────────────────────────────┐
//!          ▼                              │
//!   Home ──┴── count >= threshold ──► Away ── … symmetric
//!     ▲                                 │
//!     └── agreeing probe resets count ──┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Confirmed presence of the tracked occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyStatus {
    Home,
    Away,
    #[default]
    Unknown,
}

impl OccupancyStatus {
    fn from_probe(present: bool) -> Self {
        if present { Self::Home } else { Self::Away }
    }
}

impl fmt::Display for OccupancyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Away => f.write_str("away"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// A confirmed change of occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyEvent {
    Arrived,
    Departed,
}

impl fmt::Display for OccupancyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrived => f.write_str("arrived"),
            Self::Departed => f.write_str("departed"),
        }
    }
}

/// Persisted presence record.
///
/// Unknown fields are ignored and missing fields default, so older and
/// newer binaries can share the same file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OccupancyState {
    pub status: OccupancyStatus,
    /// Consecutive probes contradicting `status` since it was last confirmed.
    pub consecutive_failures: u32,
    pub last_confirmed_at: Option<Timestamp>,
}

impl OccupancyState {
    /// Fold one probe result into the state.
    ///
    /// Returns an event only when the confirmed status flips. Leaving
    /// [`OccupancyStatus::Unknown`] adopts the first probe silently.
    pub fn observe(
        &mut self,
        present: bool,
        threshold: u32,
        at: Timestamp,
    ) -> Option<OccupancyEvent> {
        let observed = OccupancyStatus::from_probe(present);

        if self.status == OccupancyStatus::Unknown {
            self.status = observed;
            self.consecutive_failures = 0;
            self.last_confirmed_at = Some(at);
            return None;
        }

        if observed == self.status {
            self.consecutive_failures = 0;
            self.last_confirmed_at = Some(at);
            return None;
        }

        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures < threshold.max(1) {
            return None;
        }

        self.status = observed;
        self.consecutive_failures = 0;
        self.last_confirmed_at = Some(at);
        Some(match observed {
            OccupancyStatus::Home => OccupancyEvent::Arrived,
            _ => OccupancyEvent::Departed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> Timestamp {
        chrono::Utc
            .with_ymd_and_hms(2026, 1, 10, 8, minute, 0)
            .unwrap()
    }

    fn home() -> OccupancyState {
        OccupancyState {
            status: OccupancyStatus::Home,
            consecutive_failures: 0,
            last_confirmed_at: Some(at(0)),
        }
    }

    #[test]
    fn should_default_to_unknown() {
        let state = OccupancyState::default();
        assert_eq!(state.status, OccupancyStatus::Unknown);
        assert_eq!(state.consecutive_failures, 0);
        assert!(state.last_confirmed_at.is_none());
    }

    #[test]
    fn should_adopt_first_probe_silently_when_unknown() {
        let mut state = OccupancyState::default();
        assert_eq!(state.observe(false, 3, at(2)), None);
        assert_eq!(state.status, OccupancyStatus::Away);
        assert_eq!(state.last_confirmed_at, Some(at(2)));
    }

    #[test]
    fn should_not_flip_on_single_failed_probe_followed_by_success() {
        let mut state = home();
        assert_eq!(state.observe(false, 3, at(2)), None);
        assert_eq!(state.consecutive_failures, 1);
        assert_eq!(state.observe(true, 3, at(4)), None);
        assert_eq!(state.status, OccupancyStatus::Home);
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.last_confirmed_at, Some(at(4)));
    }

    #[test]
    fn should_depart_after_threshold_contrary_probes() {
        let mut state = home();
        assert_eq!(state.observe(false, 3, at(2)), None);
        assert_eq!(state.observe(false, 3, at(4)), None);
        assert_eq!(state.observe(false, 3, at(6)), Some(OccupancyEvent::Departed));
        assert_eq!(state.status, OccupancyStatus::Away);
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.last_confirmed_at, Some(at(6)));
    }

    #[test]
    fn should_arrive_after_threshold_contrary_probes() {
        let mut state = OccupancyState {
            status: OccupancyStatus::Away,
            ..OccupancyState::default()
        };
        assert_eq!(state.observe(true, 2, at(2)), None);
        assert_eq!(state.observe(true, 2, at(4)), Some(OccupancyEvent::Arrived));
        assert_eq!(state.status, OccupancyStatus::Home);
    }

    #[test]
    fn should_treat_zero_threshold_as_one() {
        let mut state = home();
        assert_eq!(state.observe(false, 0, at(2)), Some(OccupancyEvent::Departed));
    }

    #[test]
    fn should_ignore_unknown_fields_when_deserializing() {
        let json = r#"{"status":"away","consecutive_failures":2,"future_field":true}"#;
        let state: OccupancyState = serde_json::from_str(json).unwrap();
        assert_eq!(state.status, OccupancyStatus::Away);
        assert_eq!(state.consecutive_failures, 2);
        assert!(state.last_confirmed_at.is_none());
    }
}
