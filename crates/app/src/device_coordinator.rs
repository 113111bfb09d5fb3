//! Device coordinator — one fault-isolated, timed call per device.
//!
//! Each call runs in its own task under a deadline. Whatever happens inside
//! (error, panic, hang) comes back as a [`DeviceActionResult`]; nothing
//! escapes to abort the sibling calls of the same transition.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hearthmode_domain::device::{DeviceActionResult, DeviceCommand};
use hearthmode_domain::time::elapsed_ms;

use crate::ports::{DeviceClient, DeviceError};

/// Default per-call deadline.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Invokes device clients with isolation, timing and optional dry-run.
#[derive(Debug, Clone, Copy)]
pub struct DeviceCoordinator {
    timeout: Duration,
    dry_run: bool,
}

impl Default for DeviceCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_TIMEOUT, false)
    }
}

impl DeviceCoordinator {
    #[must_use]
    pub fn new(timeout: Duration, dry_run: bool) -> Self {
        Self { timeout, dry_run }
    }

    /// Whether calls are only logged, never sent.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply `command` to one device and capture the outcome.
    ///
    /// No automatic retry: the next cron invocation is the retry.
    #[tracing::instrument(skip(self, client, command), fields(action = command.action_name(), target = %command))]
    pub async fn invoke<D>(
        &self,
        device: &str,
        client: &Arc<D>,
        command: &DeviceCommand,
    ) -> DeviceActionResult
    where
        D: DeviceClient + 'static,
    {
        if self.dry_run {
            tracing::info!("dry run: would apply command");
            return DeviceActionResult::ok(device, command, 0);
        }

        let started = Instant::now();
        let outcome = self.call(client, *command).await;
        let duration_ms = elapsed_ms(started.elapsed());

        match outcome {
            Ok(()) => {
                tracing::info!(duration_ms, "device applied command");
                DeviceActionResult::ok(device, command, duration_ms)
            }
            Err(error) => {
                let kind = error.kind();
                tracing::warn!(%error, error_kind = %kind, duration_ms, "device action failed");
                DeviceActionResult::failed(device, command, kind, error.to_string(), duration_ms)
            }
        }
    }

    async fn call<D>(&self, client: &Arc<D>, command: DeviceCommand) -> Result<(), DeviceError>
    where
        D: DeviceClient + 'static,
    {
        let client = Arc::clone(client);
        let mut task = tokio::spawn(async move { client.apply(&command).await });

        match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) if join_error.is_panic() => {
                Err(DeviceError::Internal("device client panicked".to_string()))
            }
            Ok(Err(join_error)) => Err(DeviceError::Internal(join_error.to_string())),
            Err(_elapsed) => {
                task.abort();
                Err(DeviceError::Timeout)
            }
        }
    }
}
