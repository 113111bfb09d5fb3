//! Transition results — per-device outcomes folded into one verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::{ActionStatus, DeviceActionResult};
use crate::id::TransitionId;
use crate::mode::Mode;
use crate::time::Timestamp;

/// Verdict over all attempted (non-skipped) device actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every attempted action succeeded (or nothing had to be done).
    Success,
    /// At least one action succeeded and at least one failed.
    Partial,
    /// Every attempted action failed.
    Failed,
}

impl OverallStatus {
    /// Fold device results; skipped devices do not count either way.
    #[must_use]
    pub fn from_results(results: &[DeviceActionResult]) -> Self {
        let ok = results
            .iter()
            .filter(|r| r.status == ActionStatus::Ok)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == ActionStatus::Failed)
            .count();
        match (ok, failed) {
            (_, 0) => Self::Success,
            (0, _) => Self::Failed,
            _ => Self::Partial,
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Partial => f.write_str("partial"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Outcome of one full transition. Logged and summarised, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionResult {
    pub id: TransitionId,
    pub mode: Mode,
    pub started_at: Timestamp,
    pub duration_ms: u64,
    pub device_results: Vec<DeviceActionResult>,
    pub overall_status: OverallStatus,
    /// Outdoor temperature used to adjust the comfort setpoint, if any.
    pub outdoor_temp_f: Option<f64>,
    pub dry_run: bool,
}

impl TransitionResult {
    /// Assemble a result, deriving `overall_status` from the device results.
    #[must_use]
    pub fn new(
        mode: Mode,
        started_at: Timestamp,
        duration_ms: u64,
        device_results: Vec<DeviceActionResult>,
    ) -> Self {
        let overall_status = OverallStatus::from_results(&device_results);
        Self {
            id: TransitionId::new(),
            mode,
            started_at,
            duration_ms,
            device_results,
            overall_status,
            outdoor_temp_f: None,
            dry_run: false,
        }
    }

    /// Results with the given status, in device order.
    pub fn with_status(&self, status: ActionStatus) -> impl Iterator<Item = &DeviceActionResult> {
        self.device_results.iter().filter(move |r| r.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceCommand, ErrorKind, PowerState};

    const OFF: DeviceCommand = DeviceCommand::SetPower {
        state: PowerState::Off,
    };

    fn ok(name: &str) -> DeviceActionResult {
        DeviceActionResult::ok(name, &OFF, 5)
    }

    fn failed(name: &str) -> DeviceActionResult {
        DeviceActionResult::failed(name, &OFF, ErrorKind::Unreachable, "no route", 5)
    }

    #[test]
    fn should_succeed_when_all_ok() {
        assert_eq!(
            OverallStatus::from_results(&[ok("a"), ok("b")]),
            OverallStatus::Success
        );
    }

    #[test]
    fn should_be_partial_when_mixed() {
        assert_eq!(
            OverallStatus::from_results(&[ok("a"), failed("b"), ok("c")]),
            OverallStatus::Partial
        );
    }

    #[test]
    fn should_fail_when_all_attempted_failed() {
        assert_eq!(
            OverallStatus::from_results(&[failed("a"), DeviceActionResult::skipped("b")]),
            OverallStatus::Failed
        );
    }

    #[test]
    fn should_ignore_skipped_results() {
        assert_eq!(
            OverallStatus::from_results(&[ok("a"), DeviceActionResult::skipped("b")]),
            OverallStatus::Success
        );
        assert_eq!(
            OverallStatus::from_results(&[DeviceActionResult::skipped("b")]),
            OverallStatus::Success
        );
    }

    #[test]
    fn should_filter_results_by_status() {
        let result = TransitionResult::new(
            Mode::Away,
            crate::time::now(),
            12,
            vec![ok("a"), failed("b"), ok("c")],
        );
        let names: Vec<_> = result
            .with_status(ActionStatus::Ok)
            .map(|r| r.device_name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(result.overall_status, OverallStatus::Partial);
    }
}
