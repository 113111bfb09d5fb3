//! Builds adapters and use-cases from a validated [`Config`].

use hearthmode_adapter_http_reqwest::{Endpoint, HttpDevice, HttpError, NtfyNotifier, OpenMeteoWeather};
use hearthmode_adapter_presence_net::NetworkProbe;
use hearthmode_adapter_storage_json::{JsonFileStore, StateDir};
use hearthmode_app::device_coordinator::DeviceCoordinator;
use hearthmode_app::ports::SystemClock;
use hearthmode_app::presence_monitor::PresenceMonitor;
use hearthmode_app::scheduler::TransitionScheduler;
use hearthmode_app::transition_engine::{EngineSettings, RegisteredDevice, TransitionEngine};
use hearthmode_domain::ledger::TransitionLedger;
use hearthmode_domain::occupancy::OccupancyState;

use crate::config::{Config, ConfigError};

pub type Engine = TransitionEngine<HttpDevice, OpenMeteoWeather, NtfyNotifier, SystemClock>;
pub type Scheduler = TransitionScheduler<JsonFileStore<TransitionLedger>>;
pub type Monitor = PresenceMonitor<NetworkProbe, JsonFileStore<OccupancyState>, SystemClock>;

/// Errors while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to set up HTTP client")]
    Http(#[from] HttpError),
}

pub fn state_dir(config: &Config) -> StateDir {
    StateDir::new(&config.state.dir)
}

/// The transition engine with every configured device registered.
///
/// # Errors
///
/// Returns [`SetupError`] if the time zone is invalid or an HTTP client
/// cannot be built.
pub fn engine(config: &Config) -> Result<Engine, SetupError> {
    let devices = config
        .devices
        .list
        .iter()
        .map(|device| {
            let endpoint = Endpoint::new(
                &device.base_url,
                device.token.clone(),
                config.devices.timeout(),
            )?;
            Ok(RegisteredDevice::new(
                device.spec(),
                HttpDevice::new(device.kind, endpoint),
            ))
        })
        .collect::<Result<Vec<_>, HttpError>>()?;

    let weather = if config.weather.enabled {
        let endpoint = Endpoint::new(&config.weather.base_url, None, config.weather.timeout())?;
        Some(OpenMeteoWeather::new(
            endpoint,
            config.weather.latitude,
            config.weather.longitude,
        ))
    } else {
        None
    };

    let notifier = if config.notify.enabled {
        let endpoint = Endpoint::new(
            &config.notify.url,
            config.notify.token.clone(),
            config.notify.timeout(),
        )?;
        Some(NtfyNotifier::new(endpoint))
    } else {
        None
    };

    let settings = EngineSettings {
        schedule: config.schedule,
        setpoints: config.setpoints,
        weather_adjustment: config.weather.adjustment.clone(),
        weather_timeout: config.weather.timeout(),
        timezone: config.timezone()?,
    };

    Ok(TransitionEngine::new(
        devices,
        DeviceCoordinator::new(config.devices.timeout(), config.general.dry_run),
        weather,
        notifier,
        SystemClock,
        settings,
    ))
}

/// # Errors
///
/// Returns [`ConfigError`] for an invalid time zone.
pub fn scheduler(config: &Config) -> Result<Scheduler, ConfigError> {
    Ok(TransitionScheduler::new(
        config.schedule,
        config.timezone()?,
        state_dir(config).ledger(),
    ))
}

#[must_use]
pub fn monitor(config: &Config) -> Monitor {
    let presence = &config.presence;
    let probe = NetworkProbe::new(&presence.target, presence.method)
        .with_mac(presence.mac.clone())
        .with_ping_timeout(presence.ping_timeout());
    PresenceMonitor::new(
        probe,
        state_dir(config).occupancy(),
        presence.threshold,
        SystemClock,
    )
}
