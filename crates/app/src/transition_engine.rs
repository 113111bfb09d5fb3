//! Transition engine — apply a named mode across every registered device.
//!
//! 1. Resolve the mode into a [`Plan`] (weather-adjusted comfort setpoint
//!    when the mode needs one; the baseline on any weather failure).
//! 2. Invoke every planned device through the [`DeviceCoordinator`],
//!    independently and to completion.
//! 3. Fold the results into one [`TransitionResult`], log it, and hand it
//!    to the notification aggregator for exactly one notification.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono_tz::Tz;
use hearthmode_domain::device::{ActionStatus, DeviceActionResult, DeviceSpec};
use hearthmode_domain::mode::Mode;
use hearthmode_domain::plan::{ClimateProfile, Plan};
use hearthmode_domain::schedule::Schedule;
use hearthmode_domain::setpoint::{Setpoints, WeatherAdjustment};
use hearthmode_domain::time::elapsed_ms;
use hearthmode_domain::transition::{OverallStatus, TransitionResult};

use crate::device_coordinator::DeviceCoordinator;
use crate::notification::summarize;
use crate::ports::{Clock, DeviceClient, Notifier, WeatherProvider};

/// Default deadline for the outdoor temperature lookup.
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can carry out a transition for a mode.
///
/// The scheduler and the presence monitor depend on this rather than on
/// the concrete engine.
pub trait ApplyMode: Send + Sync {
    fn apply(&self, mode: Mode) -> impl Future<Output = TransitionResult> + Send;
}

/// A device known to the engine: its domain description and its client.
pub struct RegisteredDevice<D> {
    pub spec: DeviceSpec,
    pub client: Arc<D>,
}

impl<D> RegisteredDevice<D> {
    #[must_use]
    pub fn new(spec: DeviceSpec, client: D) -> Self {
        Self {
            spec,
            client: Arc::new(client),
        }
    }
}

/// Policy inputs of the engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub schedule: Schedule,
    pub setpoints: Setpoints,
    pub weather_adjustment: WeatherAdjustment,
    pub weather_timeout: Duration,
    pub timezone: Tz,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            schedule: Schedule::default(),
            setpoints: Setpoints::default(),
            weather_adjustment: WeatherAdjustment::default(),
            weather_timeout: DEFAULT_WEATHER_TIMEOUT,
            timezone: Tz::UTC,
        }
    }
}

/// Applies modes to devices and reports one aggregated outcome.
pub struct TransitionEngine<D, W, N, C> {
    devices: Vec<RegisteredDevice<D>>,
    coordinator: DeviceCoordinator,
    weather: Option<W>,
    notifier: Option<N>,
    clock: C,
    settings: EngineSettings,
}

impl<D, W, N, C> TransitionEngine<D, W, N, C>
where
    D: DeviceClient + 'static,
    W: WeatherProvider,
    N: Notifier,
    C: Clock,
{
    /// Create a new engine.
    pub fn new(
        devices: Vec<RegisteredDevice<D>>,
        coordinator: DeviceCoordinator,
        weather: Option<W>,
        notifier: Option<N>,
        clock: C,
        settings: EngineSettings,
    ) -> Self {
        Self {
            devices,
            coordinator,
            weather,
            notifier,
            clock,
            settings,
        }
    }

    /// Apply `mode` to every registered device.
    ///
    /// Never fails: device errors are captured per device and a transition
    /// in which every device failed is reported as
    /// [`OverallStatus::Failed`].
    #[tracing::instrument(skip(self), fields(dry_run = self.coordinator.is_dry_run()))]
    pub async fn apply(&self, mode: Mode) -> TransitionResult {
        let started_at = self.clock.now();
        let started = Instant::now();

        let local = started_at.with_timezone(&self.settings.timezone).time();
        let in_sleep_hours = self.settings.schedule.is_sleep_hours(local);
        let profile = ClimateProfile::for_mode(mode, in_sleep_hours);

        let outdoor_temp_f = if profile == ClimateProfile::Comfort {
            self.outdoor_temperature().await
        } else {
            None
        };
        let comfort_f = self
            .settings
            .weather_adjustment
            .adjust(self.settings.setpoints.comfort_f, outdoor_temp_f);

        let specs: Vec<DeviceSpec> = self.devices.iter().map(|d| d.spec.clone()).collect();
        let plan = Plan::resolve(
            mode,
            in_sleep_hours,
            &specs,
            &self.settings.setpoints,
            comfort_f,
        );

        let mut device_results = Vec::with_capacity(plan.actions.len());
        for (device, action) in self.devices.iter().zip(&plan.actions) {
            let result = match &action.command {
                Some(command) => {
                    self.coordinator
                        .invoke(&device.spec.name, &device.client, command)
                        .await
                }
                None => DeviceActionResult::skipped(&device.spec.name),
            };
            device_results.push(result);
        }

        let mut result = TransitionResult::new(
            mode,
            started_at,
            elapsed_ms(started.elapsed()),
            device_results,
        );
        result.outdoor_temp_f = outdoor_temp_f;
        result.dry_run = self.coordinator.is_dry_run();

        log_result(&result);
        self.notify(&result).await;
        result
    }

    /// Outdoor temperature, or `None` when unavailable for any reason.
    async fn outdoor_temperature(&self) -> Option<f64> {
        let weather = self.weather.as_ref()?;
        match tokio::time::timeout(
            self.settings.weather_timeout,
            weather.current_temperature_f(),
        )
        .await
        {
            Ok(Ok(temp)) if temp.is_finite() => {
                tracing::debug!(outdoor_f = temp, "outdoor temperature");
                Some(temp)
            }
            Ok(Ok(temp)) => {
                tracing::warn!(outdoor_f = temp, "non-finite outdoor temperature, using baseline");
                None
            }
            Ok(Err(error)) => {
                tracing::warn!(%error, "weather lookup failed, using baseline");
                None
            }
            Err(_elapsed) => {
                tracing::warn!("weather lookup timed out, using baseline");
                None
            }
        }
    }

    async fn notify(&self, result: &TransitionResult) {
        let summary = summarize(result);
        tracing::info!(text = %summary.message, priority = %summary.priority, "notification");
        let Some(notifier) = &self.notifier else {
            return;
        };
        if let Err(error) = notifier.send(&summary.message, summary.priority).await {
            tracing::warn!(%error, "notification not delivered");
        }
    }
}

impl<D, W, N, C> ApplyMode for TransitionEngine<D, W, N, C>
where
    D: DeviceClient + 'static,
    W: WeatherProvider,
    N: Notifier,
    C: Clock,
{
    fn apply(&self, mode: Mode) -> impl Future<Output = TransitionResult> + Send {
        TransitionEngine::apply(self, mode)
    }
}

fn log_result(result: &TransitionResult) {
    let failed: Vec<&str> = result
        .with_status(ActionStatus::Failed)
        .map(|r| r.device_name.as_str())
        .collect();
    match result.overall_status {
        OverallStatus::Success => tracing::info!(
            transition_id = %result.id,
            mode = %result.mode,
            duration_ms = result.duration_ms,
            "transition succeeded"
        ),
        OverallStatus::Partial => tracing::warn!(
            transition_id = %result.id,
            mode = %result.mode,
            duration_ms = result.duration_ms,
            ?failed,
            "transition partially applied"
        ),
        OverallStatus::Failed => tracing::error!(
            transition_id = %result.id,
            mode = %result.mode,
            duration_ms = result.duration_ms,
            ?failed,
            "transition failed"
        ),
    }
}
