//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod device;
pub mod notifier;
pub mod presence;
pub mod state_store;
pub mod weather;

pub use clock::{Clock, SystemClock};
pub use device::{DeviceClient, DeviceError};
pub use notifier::{Notifier, NotifyError, Priority};
pub use presence::{PresenceProbe, ProbeError};
pub use state_store::{StateError, StateStore};
pub use weather::{WeatherError, WeatherProvider};
