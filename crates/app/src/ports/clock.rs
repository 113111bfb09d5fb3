//! Clock port — where "now" comes from.

use hearthmode_domain::time::{self, Timestamp};

/// Source of the current time, swappable for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::now()
    }
}
