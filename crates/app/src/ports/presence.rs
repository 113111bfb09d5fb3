//! Presence port — is the occupant's phone on the network right now?

use std::future::Future;

/// Errors from a presence probe.
///
/// The monitor treats every probe error exactly like "not present"; the
/// variants exist for logging only.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe command failed to run")]
    Spawn(#[source] std::io::Error),

    #[error("probe timed out")]
    Timeout,

    #[error("could not read neighbour table")]
    NeighbourTable(#[source] std::io::Error),
}

/// A single reachability check of the tracked device.
pub trait PresenceProbe: Send + Sync {
    fn probe(&self) -> impl Future<Output = Result<bool, ProbeError>> + Send;
}
