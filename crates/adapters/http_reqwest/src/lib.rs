//! # hearthmode-adapter-http-reqwest
//!
//! HTTP adapters using [reqwest](https://docs.rs/reqwest).
//!
//! ## Provided clients
//!
//! | Client | Port | Endpoint |
//! |--------|------|----------|
//! | [`Thermostat`] | `DeviceClient` | `PUT /api/v1/thermostat` |
//! | [`MiniSplit`] | `DeviceClient` | `POST /api/v1/control` |
//! | [`Outlet`] | `DeviceClient` | `GET /relay/0?turn=on\|off` |
//! | [`OpenMeteoWeather`] | `WeatherProvider` | `GET /v1/forecast` |
//! | [`NtfyNotifier`] | `Notifier` | `POST <topic url>` |
//!
//! Failures are mapped onto the port errors through [`HttpError`]: 401/403
//! become `auth`, timeouts `timeout`, connection failures `unreachable`,
//! anything else `unexpected_response`.
//!
//! ## Dependency rule
//!
//! Depends on `hearthmode-app` (port traits) and `hearthmode-domain` only.

pub mod devices;
pub mod endpoint;
pub mod error;
pub mod notifier;
pub mod weather;

pub use devices::{DeviceKind, HttpDevice, MiniSplit, Outlet, Thermostat};
pub use endpoint::Endpoint;
pub use error::HttpError;
pub use notifier::NtfyNotifier;
pub use weather::OpenMeteoWeather;
