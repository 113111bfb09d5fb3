//! Switched outlet — relay endpoint `GET /relay/0?turn=on|off`.

use hearthmode_app::ports::DeviceError;
use hearthmode_domain::device::{DeviceCommand, PowerState};

use crate::endpoint::Endpoint;

/// A smart plug driven through its relay endpoint.
#[derive(Debug, Clone)]
pub struct Outlet {
    endpoint: Endpoint,
}

impl Outlet {
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Switching to the current state is a success, not a skip.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unsupported`] for climate commands, otherwise
    /// the classified HTTP failure.
    pub async fn apply(&self, command: &DeviceCommand) -> Result<(), DeviceError> {
        let DeviceCommand::SetPower { state } = *command else {
            return Err(DeviceError::Unsupported {
                command: command.action_name(),
            });
        };
        let turn = match state {
            PowerState::On => "on",
            PowerState::Off => "off",
        };
        Endpoint::send(self.endpoint.get("relay/0").query(&[("turn", turn)])).await?;
        Ok(())
    }
}
