//! Transition scheduler — fires wake/sleep at most once per day.
//!
//! Every tick first consults the [`TransitionLedger`]; the common case is a
//! no-op that performs no device I/O and sends no notification.

use chrono::NaiveDate;
use chrono_tz::Tz;
use hearthmode_domain::ledger::TransitionLedger;
use hearthmode_domain::mode::{Mode, ScheduleKind};
use hearthmode_domain::schedule::Schedule;
use hearthmode_domain::time::Timestamp;
use hearthmode_domain::transition::{OverallStatus, TransitionResult};

use crate::ports::StateStore;
use crate::transition_engine::ApplyMode;

/// A scheduled transition that should run now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    pub kind: ScheduleKind,
    /// Date the matching window opened on, used as the ledger key.
    pub date: NaiveDate,
}

impl Due {
    #[must_use]
    pub fn mode(self) -> Mode {
        self.kind.mode()
    }
}

/// Matches the clock against the configured windows and keeps the ledger.
pub struct TransitionScheduler<S> {
    schedule: Schedule,
    timezone: Tz,
    store: S,
}

impl<S> TransitionScheduler<S>
where
    S: StateStore<TransitionLedger>,
{
    pub fn new(schedule: Schedule, timezone: Tz, store: S) -> Self {
        Self {
            schedule,
            timezone,
            store,
        }
    }

    /// Decide whether a scheduled transition is due at `now`.
    ///
    /// Wake is checked before sleep. An unreadable ledger counts as
    /// "nothing completed yet".
    pub fn tick(&self, now: Timestamp) -> Option<Due> {
        let local = now.with_timezone(&self.timezone).naive_local();
        let ledger = self.store.load_or_default();

        for kind in [ScheduleKind::Wake, ScheduleKind::Sleep] {
            let Some(date) = self.schedule.window(kind).opened_on(local) else {
                continue;
            };
            if ledger.is_completed(kind, date) {
                tracing::debug!(%kind, %date, "already completed for this window");
                continue;
            }
            return Some(Due { kind, date });
        }
        None
    }

    /// Tick and, when due, apply the transition and record it.
    ///
    /// The ledger is marked unless every device failed; a fully failed
    /// transition is retried by the next tick inside the same window.
    pub async fn run<A>(&self, now: Timestamp, engine: &A) -> Option<TransitionResult>
    where
        A: ApplyMode,
    {
        let Some(due) = self.tick(now) else {
            tracing::debug!("no scheduled transition due");
            return None;
        };

        tracing::info!(kind = %due.kind, date = %due.date, "scheduled transition due");
        let result = engine.apply(due.mode()).await;

        if result.overall_status == OverallStatus::Failed {
            tracing::warn!(kind = %due.kind, "transition failed, ledger left open for retry");
            return Some(result);
        }

        let mut ledger = self.store.load_or_default();
        ledger.mark_completed(due.kind, due.date);
        if let Err(error) = self.store.save(&ledger) {
            tracing::error!(%error, kind = %due.kind, "failed to record completed transition");
        }
        Some(result)
    }
}
