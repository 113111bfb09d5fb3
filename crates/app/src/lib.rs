//! # hearthmode-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceClient` — apply one command to one device
//!   - `WeatherProvider` — current outdoor temperature
//!   - `Notifier` — send one message to the household
//!   - `PresenceProbe` — is the tracked phone on the network
//!   - `StateStore` — atomic load/save of persisted state
//!   - `Clock` — where "now" comes from
//! - Define the **use-cases** driven by the binary:
//!   - `TransitionScheduler` — fire wake/sleep once per window per day
//!   - `PresenceMonitor` — debounce presence and fire away/home
//!   - `TransitionEngine` — apply a mode across all devices
//!   - `DeviceCoordinator` — fault-isolated, timed device calls
//!   - `notification::summarize` — one message per transition
//!
//! ## Dependency rule
//! Depends on `hearthmode-domain` only (plus `tokio` for timeouts and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod device_coordinator;
pub mod notification;
pub mod ports;
pub mod presence_monitor;
pub mod scheduler;
pub mod transition_engine;
