//! Common error types for domain validation.
//!
//! Each layer defines its own typed errors and converts via `#[from]`;
//! the domain only knows about invariant violations.

/// An invariant of a domain value was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A time-of-day string was not `HH:MM`.
    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTimeOfDay(String),

    /// A schedule window must be at least one minute wide and shorter than a day.
    #[error("window width must be between 1 and 1439 minutes, got {0}")]
    InvalidWindow(u32),

    /// The debounce threshold must be at least one probe.
    #[error("debounce threshold must be at least 1")]
    ZeroThreshold,

    /// A device must have a non-empty name.
    #[error("device name must not be empty")]
    EmptyDeviceName,

    /// Two devices share a name, which would make results ambiguous.
    #[error("duplicate device name {0:?}")]
    DuplicateDeviceName(String),

    /// A weather adjustment value is not a finite number or the bound is negative.
    #[error("invalid weather adjustment: {0}")]
    InvalidAdjustment(&'static str),

    /// An unknown mode name was supplied.
    #[error("unknown mode {0:?}, expected one of wake, sleep, away, home")]
    UnknownMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_invalid_time_of_day() {
        let err = ValidationError::InvalidTimeOfDay("25:00".to_string());
        assert_eq!(err.to_string(), "invalid time of day \"25:00\", expected HH:MM");
    }

    #[test]
    fn should_display_invalid_window() {
        let err = ValidationError::InvalidWindow(0);
        assert_eq!(
            err.to_string(),
            "window width must be between 1 and 1439 minutes, got 0"
        );
    }
}
