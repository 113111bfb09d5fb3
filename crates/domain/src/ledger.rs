//! Transition ledger — which scheduled transitions already ran, per date.
//!
//! Stale entries need no cleanup: comparing against the current window's
//! date invalidates yesterday's record automatically. Manual and presence
//! triggered transitions never touch the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mode::ScheduleKind;

/// Persisted per-day record of completed scheduled transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionLedger {
    pub wake_completed_date: Option<NaiveDate>,
    pub sleep_completed_date: Option<NaiveDate>,
}

impl TransitionLedger {
    fn slot(&self, kind: ScheduleKind) -> Option<NaiveDate> {
        match kind {
            ScheduleKind::Wake => self.wake_completed_date,
            ScheduleKind::Sleep => self.sleep_completed_date,
        }
    }

    /// Whether `kind` already completed for `date`.
    #[must_use]
    pub fn is_completed(&self, kind: ScheduleKind, date: NaiveDate) -> bool {
        self.slot(kind) == Some(date)
    }

    /// Record `kind` as completed for `date`.
    pub fn mark_completed(&mut self, kind: ScheduleKind, date: NaiveDate) {
        match kind {
            ScheduleKind::Wake => self.wake_completed_date = Some(date),
            ScheduleKind::Sleep => self.sleep_completed_date = Some(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn should_start_empty() {
        let ledger = TransitionLedger::default();
        assert!(!ledger.is_completed(ScheduleKind::Wake, day(1)));
        assert!(!ledger.is_completed(ScheduleKind::Sleep, day(1)));
    }

    #[test]
    fn should_mark_only_the_given_kind() {
        let mut ledger = TransitionLedger::default();
        ledger.mark_completed(ScheduleKind::Wake, day(1));
        assert!(ledger.is_completed(ScheduleKind::Wake, day(1)));
        assert!(!ledger.is_completed(ScheduleKind::Sleep, day(1)));
    }

    #[test]
    fn should_treat_previous_date_as_not_completed() {
        let mut ledger = TransitionLedger::default();
        ledger.mark_completed(ScheduleKind::Sleep, day(1));
        assert!(!ledger.is_completed(ScheduleKind::Sleep, day(2)));
    }

    #[test]
    fn should_roundtrip_dates_through_json() {
        let mut ledger = TransitionLedger::default();
        ledger.mark_completed(ScheduleKind::Wake, day(3));
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(
            json,
            r#"{"wake_completed_date":"2026-05-03","sleep_completed_date":null}"#
        );
        let parsed: TransitionLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ledger);
    }

    #[test]
    fn should_ignore_unknown_fields() {
        let json = r#"{"sleep_completed_date":"2026-05-03","away_count":4}"#;
        let ledger: TransitionLedger = serde_json::from_str(json).unwrap();
        assert!(ledger.is_completed(ScheduleKind::Sleep, day(3)));
        assert!(ledger.wake_completed_date.is_none());
    }
}
