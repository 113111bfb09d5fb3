//! Device clients — thermostat, mini-split, outlet.
//!
//! Each client is a thin wrapper over one [`Endpoint`]; [`HttpDevice`]
//! lets a single engine hold all of them behind one `DeviceClient` type.

mod mini_split;
mod outlet;
mod thermostat;

pub use mini_split::MiniSplit;
pub use outlet::Outlet;
pub use thermostat::Thermostat;

use hearthmode_app::ports::{DeviceClient, DeviceError};
use hearthmode_domain::device::DeviceCommand;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// Which HTTP API a configured device speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Thermostat,
    MiniSplit,
    Outlet,
}

/// Wrapper enum for the concrete device client types.
#[derive(Debug, Clone)]
pub enum HttpDevice {
    Thermostat(Thermostat),
    MiniSplit(MiniSplit),
    Outlet(Outlet),
}

impl HttpDevice {
    #[must_use]
    pub fn new(kind: DeviceKind, endpoint: Endpoint) -> Self {
        match kind {
            DeviceKind::Thermostat => Self::Thermostat(Thermostat::new(endpoint)),
            DeviceKind::MiniSplit => Self::MiniSplit(MiniSplit::new(endpoint)),
            DeviceKind::Outlet => Self::Outlet(Outlet::new(endpoint)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Thermostat(_) => DeviceKind::Thermostat,
            Self::MiniSplit(_) => DeviceKind::MiniSplit,
            Self::Outlet(_) => DeviceKind::Outlet,
        }
    }
}

impl DeviceClient for HttpDevice {
    async fn apply(&self, command: &DeviceCommand) -> Result<(), DeviceError> {
        match self {
            Self::Thermostat(d) => d.apply(command).await,
            Self::MiniSplit(d) => d.apply(command).await,
            Self::Outlet(d) => d.apply(command).await,
        }
    }
}
