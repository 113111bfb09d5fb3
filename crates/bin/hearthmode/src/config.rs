//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hearthmode.toml` in the working directory unless a path is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use hearthmode_adapter_http_reqwest::DeviceKind;
use hearthmode_adapter_presence_net::ProbeMethod;
use hearthmode_app::presence_monitor::DEFAULT_THRESHOLD;
use hearthmode_domain::device::{DeviceRole, DeviceSpec};
use hearthmode_domain::error::ValidationError;
use hearthmode_domain::schedule::Schedule;
use hearthmode_domain::setpoint::{Setpoints, WeatherAdjustment};
use serde::Deserialize;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "hearthmode.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    /// Wake/sleep times and window width.
    pub schedule: Schedule,
    pub presence: PresenceConfig,
    /// Target temperatures per mode.
    pub setpoints: Setpoints,
    pub weather: WeatherConfig,
    pub devices: DevicesConfig,
    pub notify: NotifyConfig,
    pub state: StateConfig,
    pub logging: LoggingConfig,
}

/// Process-wide settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log device actions instead of sending them.
    pub dry_run: bool,
    /// IANA time zone the schedule is expressed in.
    pub timezone: String,
}

/// Network presence probe.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    pub enabled: bool,
    /// IP address or host name of the occupant's phone.
    pub target: String,
    /// Hardware address, matched in the neighbour table when the IP changes.
    pub mac: Option<String>,
    pub method: ProbeMethod,
    /// Consecutive contrary probes before occupancy flips.
    pub threshold: u32,
    pub ping_timeout_secs: u64,
}

/// Outdoor temperature lookup and comfort adjustment rules.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub enabled: bool,
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timeout_secs: u64,
    #[serde(flatten)]
    pub adjustment: WeatherAdjustment,
}

/// Registered devices.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    /// Per-call deadline.
    pub timeout_secs: u64,
    pub list: Vec<DeviceConfig>,
}

/// Which climate slot a thermostat or mini-split fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateRole {
    Primary,
    Secondary,
}

/// One `[[devices.list]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub kind: DeviceKind,
    /// Climate devices only; thermostats default to primary, mini-splits to secondary.
    #[serde(default)]
    pub role: Option<ClimateRole>,
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

/// Push notifications.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub enabled: bool,
    /// Full topic URL.
    pub url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

/// Where persisted state lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

fn enabled_by_default() -> bool {
    true
}

impl Config {
    /// Load configuration then apply environment-variable overrides.
    ///
    /// A missing file is only an error when `path` was given explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or
    /// describes an unusable setup.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HEARTHMODE_STATE_DIR") {
            self.state.dir = PathBuf::from(val);
        }
        if let Some(val) = var("HEARTHMODE_DRY_RUN") {
            self.general.dry_run = matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(val) = var("HEARTHMODE_NOTIFY_TOKEN") {
            self.notify.token = Some(val);
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("HEARTHMODE_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.schedule.validate()?;
        self.timezone()?;
        DeviceSpec::validate_all(&self.device_specs())?;

        self.weather.adjustment.validate()?;

        if self.presence.threshold == 0 {
            return Err(ValidationError::ZeroThreshold.into());
        }
        for (name, secs) in [
            ("presence.ping_timeout_secs", self.presence.ping_timeout_secs),
            ("weather.timeout_secs", self.weather.timeout_secs),
            ("devices.timeout_secs", self.devices.timeout_secs),
            ("notify.timeout_secs", self.notify.timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Validation(format!("{name} must be at least 1")));
            }
        }
        if self.presence.enabled && self.presence.target.trim().is_empty() {
            return Err(ConfigError::Validation(
                "presence.target is required when presence is enabled".to_string(),
            ));
        }
        if self.notify.enabled && self.notify.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "notify.url is required when notifications are enabled".to_string(),
            ));
        }
        if let Some(device) = self.devices.list.iter().find(|d| d.base_url.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "device {} has no base_url",
                device.name
            )));
        }
        Ok(())
    }

    /// The configured time zone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unknown zone name.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.general
            .timezone
            .parse()
            .map_err(|_| ConfigError::Validation(format!("unknown timezone {}", self.general.timezone)))
    }

    /// Domain view of the configured devices, in file order.
    #[must_use]
    pub fn device_specs(&self) -> Vec<DeviceSpec> {
        self.devices.list.iter().map(DeviceConfig::spec).collect()
    }
}

impl DeviceConfig {
    #[must_use]
    pub fn role(&self) -> DeviceRole {
        let climate = match self.kind {
            DeviceKind::Outlet => return DeviceRole::Outlet,
            DeviceKind::Thermostat => self.role.unwrap_or(ClimateRole::Primary),
            DeviceKind::MiniSplit => self.role.unwrap_or(ClimateRole::Secondary),
        };
        match climate {
            ClimateRole::Primary => DeviceRole::PrimaryClimate,
            ClimateRole::Secondary => DeviceRole::SecondaryClimate,
        }
    }

    #[must_use]
    pub fn spec(&self) -> DeviceSpec {
        DeviceSpec {
            enabled: self.enabled,
            ..DeviceSpec::new(&self.name, self.role())
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            timezone: "UTC".to_string(),
        }
    }
}

impl PresenceConfig {
    #[must_use]
    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target: String::new(),
            mac: None,
            method: ProbeMethod::default(),
            threshold: DEFAULT_THRESHOLD,
            ping_timeout_secs: 2,
        }
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: hearthmode_adapter_http_reqwest::weather::DEFAULT_BASE_URL.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            timeout_secs: 5,
            adjustment: WeatherAdjustment::default(),
        }
    }
}

impl DevicesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            list: Vec::new(),
        }
    }
}

impl NotifyConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            token: None,
            timeout_secs: 5,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./state"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hearthmode=info,hearthmode_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A domain invariant does not hold.
    #[error("invalid configuration")]
    Domain(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
