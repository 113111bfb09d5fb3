//! Notification aggregator — one message per transition, never one per device.
//!
//! All "what do we tell the human" policy lives here so the wording can
//! change without touching the engine or the coordinator.

use hearthmode_domain::device::{ActionStatus, DeviceActionResult, format_temp};
use hearthmode_domain::transition::{OverallStatus, TransitionResult};

use crate::ports::Priority;

/// A composed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub message: String,
    pub priority: Priority,
}

/// Compose the single notification for a transition.
///
/// Skipped devices are omitted. Failed devices are listed with their error
/// kind. A fully failed transition is high priority.
#[must_use]
pub fn summarize(result: &TransitionResult) -> Summary {
    let label = result.mode.label();
    let applied = join(result.with_status(ActionStatus::Ok), describe_ok);
    let failures = join(result.with_status(ActionStatus::Failed), describe_failed);

    let mut message = match result.overall_status {
        OverallStatus::Success if applied.is_empty() => format!("{label}: no device changes"),
        OverallStatus::Success => format!("{label}: {applied}"),
        OverallStatus::Partial => format!("{label} partially applied: {applied}. Failed: {failures}"),
        OverallStatus::Failed => format!("{label} FAILED: {failures}"),
    };

    if let Some(outdoor) = result.outdoor_temp_f {
        message.push_str(&format!(" (outdoor {})", format_temp(outdoor)));
    }
    if result.dry_run {
        message.insert_str(0, "[dry run] ");
    }

    let priority = match result.overall_status {
        OverallStatus::Failed => Priority::High,
        OverallStatus::Success | OverallStatus::Partial => Priority::Normal,
    };

    Summary { message, priority }
}

fn describe_ok(result: &DeviceActionResult) -> String {
    match &result.target {
        Some(target) => format!("{} {target}", result.device_name),
        None => result.device_name.clone(),
    }
}

fn describe_failed(result: &DeviceActionResult) -> String {
    match result.error_kind {
        Some(kind) => format!("{} ({kind})", result.device_name),
        None => result.device_name.clone(),
    }
}

fn join<'a>(
    results: impl Iterator<Item = &'a DeviceActionResult>,
    describe: fn(&DeviceActionResult) -> String,
) -> String {
    results.map(describe).collect::<Vec<_>>().join(", ")
}
