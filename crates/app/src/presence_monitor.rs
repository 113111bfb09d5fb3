//! Presence monitor — debounced occupancy detection.
//!
//! Each check probes once, folds the result into the persisted
//! [`OccupancyState`], and reports an event only on a confirmed flip.

use hearthmode_domain::mode::Mode;
use hearthmode_domain::occupancy::{OccupancyEvent, OccupancyState};
use hearthmode_domain::transition::TransitionResult;

use crate::ports::{Clock, PresenceProbe, StateStore};
use crate::transition_engine::ApplyMode;

/// Default number of consecutive contrary probes before a flip.
pub const DEFAULT_THRESHOLD: u32 = 3;

pub struct PresenceMonitor<P, S, C> {
    probe: P,
    store: S,
    threshold: u32,
    clock: C,
}

impl<P, S, C> PresenceMonitor<P, S, C>
where
    P: PresenceProbe,
    S: StateStore<OccupancyState>,
    C: Clock,
{
    pub fn new(probe: P, store: S, threshold: u32, clock: C) -> Self {
        Self {
            probe,
            store,
            threshold,
            clock,
        }
    }

    /// Probe once and update the persisted occupancy state.
    ///
    /// A probe error counts as "not present".
    #[tracing::instrument(skip(self), fields(threshold = self.threshold))]
    pub async fn check(&self) -> Option<OccupancyEvent> {
        let present = match self.probe.probe().await {
            Ok(present) => present,
            Err(error) => {
                tracing::debug!(%error, "probe failed, counting as absent");
                false
            }
        };

        let mut state = self.store.load_or_default();
        let previous = state.status;
        let event = state.observe(present, self.threshold, self.clock.now());

        tracing::debug!(
            present,
            status = %state.status,
            consecutive_failures = state.consecutive_failures,
            "presence probed"
        );
        if let Some(event) = event {
            tracing::info!(%event, from = %previous, to = %state.status, "occupancy changed");
        }

        if let Err(error) = self.store.save(&state) {
            tracing::error!(%error, "failed to persist occupancy state");
        }
        event
    }

    /// Check and, on a confirmed flip, apply `away` or `home`.
    pub async fn run<A>(&self, engine: &A) -> Option<TransitionResult>
    where
        A: ApplyMode,
    {
        let mode = match self.check().await? {
            OccupancyEvent::Departed => Mode::Away,
            OccupancyEvent::Arrived => Mode::Home,
        };
        Some(engine.apply(mode).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ProbeError, StateError};
    use chrono::TimeZone;
    use hearthmode_domain::occupancy::OccupancyStatus;
    use hearthmode_domain::time::Timestamp;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;

    /// Replays a scripted sequence of probe outcomes; `None` is a probe error.
    struct ScriptedProbe(Mutex<VecDeque<Option<bool>>>);

    impl ScriptedProbe {
        fn new(script: &[Option<bool>]) -> Self {
            Self(Mutex::new(script.iter().copied().collect()))
        }
    }

    impl PresenceProbe for ScriptedProbe {
        fn probe(&self) -> impl Future<Output = Result<bool, ProbeError>> + Send {
            let next = self.0.lock().unwrap().pop_front().flatten();
            async move { next.ok_or(ProbeError::Timeout) }
        }
    }

    #[derive(Default)]
    struct MemoryStore(Mutex<Option<OccupancyState>>);

    impl MemoryStore {
        fn with(status: OccupancyStatus) -> Self {
            Self(Mutex::new(Some(OccupancyState {
                status,
                ..OccupancyState::default()
            })))
        }

        fn current(&self) -> OccupancyState {
            self.0.lock().unwrap().clone().unwrap_or_default()
        }
    }

    impl StateStore<OccupancyState> for MemoryStore {
        fn load(&self) -> Result<Option<OccupancyState>, StateError> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn save(&self, state: &OccupancyState) -> Result<(), StateError> {
            *self.0.lock().unwrap() = Some(state.clone());
            Ok(())
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            chrono::Utc.with_ymd_and_hms(2026, 2, 1, 18, 0, 0).unwrap()
        }
    }

    #[derive(Default)]
    struct SpyEngine(Mutex<Vec<Mode>>);

    impl ApplyMode for SpyEngine {
        fn apply(&self, mode: Mode) -> impl Future<Output = TransitionResult> + Send {
            self.0.lock().unwrap().push(mode);
            let result = TransitionResult::new(mode, FixedClock.now(), 0, Vec::new());
            async move { result }
        }
    }

    fn monitor(
        script: &[Option<bool>],
        store: MemoryStore,
    ) -> PresenceMonitor<ScriptedProbe, MemoryStore, FixedClock> {
        PresenceMonitor::new(ScriptedProbe::new(script), store, DEFAULT_THRESHOLD, FixedClock)
    }

    #[tokio::test]
    async fn should_not_flip_on_single_missed_probe() {
        let monitor = monitor(
            &[Some(false), Some(true)],
            MemoryStore::with(OccupancyStatus::Home),
        );

        assert_eq!(monitor.check().await, None);
        assert_eq!(monitor.store.current().consecutive_failures, 1);
        assert_eq!(monitor.check().await, None);

        let state = monitor.store.current();
        assert_eq!(state.status, OccupancyStatus::Home);
        assert_eq!(state.consecutive_failures, 0);
    }

    #[tokio::test]
    async fn should_depart_after_threshold_contrary_probes() {
        let monitor = monitor(
            &[Some(false), None, Some(false)],
            MemoryStore::with(OccupancyStatus::Home),
        );
        let engine = SpyEngine::default();

        assert!(monitor.run(&engine).await.is_none());
        assert!(monitor.run(&engine).await.is_none());
        let result = monitor.run(&engine).await.unwrap();

        assert_eq!(result.mode, Mode::Away);
        assert_eq!(*engine.0.lock().unwrap(), vec![Mode::Away]);
        assert_eq!(monitor.store.current().status, OccupancyStatus::Away);
    }

    #[tokio::test]
    async fn should_apply_home_on_arrival() {
        let monitor = monitor(
            &[Some(true), Some(true), Some(true)],
            MemoryStore::with(OccupancyStatus::Away),
        );
        let engine = SpyEngine::default();

        monitor.run(&engine).await;
        monitor.run(&engine).await;
        monitor.run(&engine).await;

        assert_eq!(*engine.0.lock().unwrap(), vec![Mode::Home]);
    }

    #[tokio::test]
    async fn should_adopt_first_probe_without_event_when_unknown() {
        let monitor = monitor(&[Some(true)], MemoryStore::default());
        let engine = SpyEngine::default();

        assert!(monitor.run(&engine).await.is_none());
        assert_eq!(monitor.store.current().status, OccupancyStatus::Home);
        assert!(engine.0.lock().unwrap().is_empty());
    }
}
