//! State store port — persistence of the two small mutable records.
//!
//! [`OccupancyState`](hearthmode_domain::occupancy::OccupancyState) and
//! [`TransitionLedger`](hearthmode_domain::ledger::TransitionLedger) are the
//! only state shared between invocations. Implementations must replace the
//! stored value atomically so a concurrent reader never sees half a write.

/// Errors from loading or saving persisted state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The backing medium failed (permissions, disk full, …).
    #[error("state storage I/O error")]
    Io(#[from] std::io::Error),

    /// The stored value exists but cannot be decoded.
    #[error("stored state is malformed: {0}")]
    Corrupt(String),
}

/// Load/save of one persisted record type.
pub trait StateStore<S>: Send + Sync {
    /// Load the stored value; `Ok(None)` when nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] when the value cannot be read or decoded.
    fn load(&self) -> Result<Option<S>, StateError>;

    /// Atomically replace the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] when the write fails.
    fn save(&self, state: &S) -> Result<(), StateError>;

    /// Load, treating a missing or unreadable record as the default value.
    ///
    /// Corrupt state is overwritten by the next successful save.
    fn load_or_default(&self) -> S
    where
        S: Default,
    {
        match self.load() {
            Ok(Some(state)) => state,
            Ok(None) => S::default(),
            Err(error) => {
                tracing::warn!(%error, "unreadable state, falling back to defaults");
                S::default()
            }
        }
    }
}
