//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `started_at`, `last_confirmed_at`, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Milliseconds elapsed between two instants, saturating at `u64::MAX`.
#[must_use]
pub fn elapsed_ms(elapsed: std::time::Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
