//! Schedule — wake/sleep times of day and the windows in which they fire.
//!
//! The scheduler is re-invoked by cron, so "fire at 22:30" really means
//! "fire on the first invocation inside `[22:30, 22:30 + width)`". Windows
//! may run past midnight; such a window belongs to the date it opened on.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::mode::ScheduleKind;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Default window width, matching the expected cron cadence.
pub const DEFAULT_WINDOW_MINUTES: u32 = 15;

/// A wall-clock time of day with minute precision, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u32,
}

impl TimeOfDay {
    /// Build from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeOfDay`] when out of range.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTimeOfDay(format!(
                "{hour:02}:{minute:02}"
            )));
        }
        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Minutes since midnight.
    #[must_use]
    pub fn minutes_from_midnight(self) -> u32 {
        self.minutes
    }

    fn of(time: NaiveTime) -> u32 {
        time.hour() * 60 + time.minute()
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeOfDay(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 || !digits(hour) || !digits(minute)
        {
            return Err(invalid());
        }
        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// A half-open window `[start, start + width)` repeating every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: TimeOfDay,
    pub width_minutes: u32,
}

impl ScheduleWindow {
    /// If `now` falls inside the window, the calendar date the window opened on.
    ///
    /// A tick at 00:05 inside a window opened at 23:55 belongs to the
    /// previous date, so the ledger still sees a single run.
    #[must_use]
    pub fn opened_on(&self, now: NaiveDateTime) -> Option<NaiveDate> {
        let start = self.start.minutes_from_midnight();
        let current = TimeOfDay::of(now.time());
        let offset = (current + MINUTES_PER_DAY - start) % MINUTES_PER_DAY;
        if offset >= self.width_minutes {
            return None;
        }
        if current >= start {
            Some(now.date())
        } else {
            now.date().pred_opt()
        }
    }
}

/// Configured wake/sleep times and the window width shared by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub wake_time: TimeOfDay,
    pub sleep_time: TimeOfDay,
    pub window_minutes: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            wake_time: TimeOfDay { minutes: 6 * 60 + 30 },
            sleep_time: TimeOfDay {
                minutes: 22 * 60 + 30,
            },
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }
}

impl Schedule {
    /// Check invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWindow`] when the window is empty
    /// or spans a whole day.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_minutes == 0 || self.window_minutes >= MINUTES_PER_DAY {
            return Err(ValidationError::InvalidWindow(self.window_minutes));
        }
        Ok(())
    }

    /// The window for a scheduled transition kind.
    #[must_use]
    pub fn window(&self, kind: ScheduleKind) -> ScheduleWindow {
        let start = match kind {
            ScheduleKind::Wake => self.wake_time,
            ScheduleKind::Sleep => self.sleep_time,
        };
        ScheduleWindow {
            start,
            width_minutes: self.window_minutes,
        }
    }

    /// Whether `time` falls between `sleep_time` (inclusive) and `wake_time`
    /// (exclusive), handling the overnight wrap.
    #[must_use]
    pub fn is_sleep_hours(&self, time: NaiveTime) -> bool {
        let now = TimeOfDay::of(time);
        let sleep = self.sleep_time.minutes_from_midnight();
        let wake = self.wake_time.minutes_from_midnight();
        if sleep <= wake {
            now >= sleep && now < wake
        } else {
            now >= sleep || now < wake
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn should_parse_and_display_time_of_day() {
        assert_eq!(tod("06:05").to_string(), "06:05");
        assert_eq!(tod("7:45").to_string(), "07:45");
        assert_eq!(tod("22:30").minutes_from_midnight(), 22 * 60 + 30);
    }

    #[test]
    fn should_reject_malformed_time_of_day() {
        for bad in ["", "24:00", "12:60", "12", "12:5", "ab:cd", "123:00", "+5:00", "05:+0"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn should_honour_window_boundaries_for_sleep_time() {
        let window = ScheduleWindow {
            start: tod("22:30"),
            width_minutes: 15,
        };
        assert_eq!(window.opened_on(at("2026-03-01", "22:29:59")), None);
        assert_eq!(
            window.opened_on(at("2026-03-01", "22:30:00")),
            Some(day("2026-03-01"))
        );
        assert_eq!(
            window.opened_on(at("2026-03-01", "22:44:59")),
            Some(day("2026-03-01"))
        );
        assert_eq!(window.opened_on(at("2026-03-01", "22:45:00")), None);
    }

    #[test]
    fn should_roll_over_the_hour() {
        let window = ScheduleWindow {
            start: tod("06:50"),
            width_minutes: 15,
        };
        assert!(window.opened_on(at("2026-03-01", "07:04:00")).is_some());
        assert!(window.opened_on(at("2026-03-01", "07:05:00")).is_none());
    }

    #[test]
    fn should_attribute_midnight_spanning_window_to_opening_date() {
        let window = ScheduleWindow {
            start: tod("23:55"),
            width_minutes: 15,
        };
        assert_eq!(
            window.opened_on(at("2026-03-01", "23:58:00")),
            Some(day("2026-03-01"))
        );
        assert_eq!(
            window.opened_on(at("2026-03-02", "00:05:00")),
            Some(day("2026-03-01"))
        );
        assert_eq!(window.opened_on(at("2026-03-02", "00:10:00")), None);
    }

    #[test]
    fn should_reject_empty_window() {
        let schedule = Schedule {
            window_minutes: 0,
            ..Schedule::default()
        };
        assert_eq!(schedule.validate(), Err(ValidationError::InvalidWindow(0)));
    }

    #[test]
    fn should_detect_overnight_sleep_hours() {
        let schedule = Schedule::default();
        let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        assert!(schedule.is_sleep_hours(t("23:00")));
        assert!(schedule.is_sleep_hours(t("03:00")));
        assert!(schedule.is_sleep_hours(t("22:30")));
        assert!(!schedule.is_sleep_hours(t("06:30")));
        assert!(!schedule.is_sleep_hours(t("12:00")));
    }

    #[test]
    fn should_detect_daytime_sleep_hours_for_night_shift() {
        let schedule = Schedule {
            wake_time: tod("15:00"),
            sleep_time: tod("08:00"),
            window_minutes: 15,
        };
        let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        assert!(schedule.is_sleep_hours(t("10:00")));
        assert!(!schedule.is_sleep_hours(t("20:00")));
    }

    #[test]
    fn should_deserialize_schedule_from_strings() {
        let json = r#"{"wake_time":"05:00","sleep_time":"21:15"}"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.wake_time, tod("05:00"));
        assert_eq!(schedule.sleep_time, tod("21:15"));
        assert_eq!(schedule.window_minutes, DEFAULT_WINDOW_MINUTES);
    }

    #[test]
    fn should_fail_to_deserialize_invalid_time() {
        let json = r#"{"wake_time":"5am"}"#;
        assert!(serde_json::from_str::<Schedule>(json).is_err());
    }
}
