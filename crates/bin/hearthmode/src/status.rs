//! Human-readable snapshot for the `status` command.

use std::fmt::Write;

use chrono_tz::Tz;
use hearthmode_app::scheduler::Due;
use hearthmode_domain::ledger::TransitionLedger;
use hearthmode_domain::mode::ScheduleKind;
use hearthmode_domain::occupancy::OccupancyState;
use hearthmode_domain::schedule::Schedule;

pub struct Snapshot<'a> {
    pub occupancy: &'a OccupancyState,
    pub ledger: &'a TransitionLedger,
    pub schedule: &'a Schedule,
    pub due: Option<Due>,
    pub timezone: Tz,
    pub dry_run: bool,
}

#[must_use]
pub fn render(snapshot: &Snapshot<'_>) -> String {
    let mut out = String::new();
    let occupancy = snapshot.occupancy;
    let confirmed = occupancy.last_confirmed_at.map_or_else(
        || "never".to_string(),
        |at| at.with_timezone(&snapshot.timezone).format("%Y-%m-%d %H:%M").to_string(),
    );
    let _ = writeln!(
        out,
        "occupancy: {} ({} contrary probes, last confirmed {confirmed})",
        occupancy.status, occupancy.consecutive_failures
    );

    for kind in [ScheduleKind::Wake, ScheduleKind::Sleep] {
        let window = snapshot.schedule.window(kind);
        let completed = match kind {
            ScheduleKind::Wake => snapshot.ledger.wake_completed_date,
            ScheduleKind::Sleep => snapshot.ledger.sleep_completed_date,
        };
        let completed = completed.map_or_else(|| "never".to_string(), |date| date.to_string());
        let _ = writeln!(
            out,
            "{kind}: {} +{}m, last completed {completed}",
            window.start, window.width_minutes
        );
    }

    let due = snapshot
        .due
        .map_or_else(|| "none".to_string(), |due| format!("{} ({})", due.kind, due.date));
    let _ = writeln!(out, "due now: {due}");
    let _ = write!(
        out,
        "timezone: {}, dry run: {}",
        snapshot.timezone,
        if snapshot.dry_run { "on" } else { "off" }
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hearthmode_domain::occupancy::OccupancyStatus;

    #[test]
    fn should_render_fresh_install() {
        let occupancy = OccupancyState::default();
        let ledger = TransitionLedger::default();
        let schedule = Schedule::default();

        let text = render(&Snapshot {
            occupancy: &occupancy,
            ledger: &ledger,
            schedule: &schedule,
            due: None,
            timezone: Tz::UTC,
            dry_run: false,
        });

        assert_eq!(
            text,
            "occupancy: unknown (0 contrary probes, last confirmed never)\n\
             wake: 06:30 +15m, last completed never\n\
             sleep: 22:30 +15m, last completed never\n\
             due now: none\n\
             timezone: UTC, dry run: off"
        );
    }

    #[test]
    fn should_show_due_window_and_completed_dates() {
        let occupancy = OccupancyState {
            status: OccupancyStatus::Away,
            consecutive_failures: 1,
            last_confirmed_at: None,
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let mut ledger = TransitionLedger::default();
        ledger.mark_completed(ScheduleKind::Wake, date);
        let schedule = Schedule::default();

        let text = render(&Snapshot {
            occupancy: &occupancy,
            ledger: &ledger,
            schedule: &schedule,
            due: Some(Due {
                kind: ScheduleKind::Sleep,
                date,
            }),
            timezone: Tz::UTC,
            dry_run: true,
        });

        assert!(text.contains("occupancy: away (1 contrary probes"));
        assert!(text.contains("wake: 06:30 +15m, last completed 2026-03-04"));
        assert!(text.contains("due now: sleep (2026-03-04)"));
        assert!(text.ends_with("dry run: on"));
    }
}
