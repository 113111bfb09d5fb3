//! Setpoints per mode and the outdoor-temperature adjustment of the comfort setpoint.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Configured target temperatures in °F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setpoints {
    /// Comfort baseline for `wake` (and `home` outside sleep hours).
    pub comfort_f: f64,
    /// Eco/minimum setpoint of the primary device while asleep.
    pub sleep_primary_f: f64,
    /// Night setpoint of the secondary device while asleep.
    pub sleep_secondary_f: f64,
    /// Eco setpoint for both climate devices while away.
    pub away_f: f64,
}

impl Default for Setpoints {
    fn default() -> Self {
        Self {
            comfort_f: 70.0,
            sleep_primary_f: 62.0,
            sleep_secondary_f: 66.0,
            away_f: 58.0,
        }
    }
}

/// One outdoor-temperature rule: exactly one of `below_f`/`above_f` is expected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRule {
    #[serde(default)]
    pub below_f: Option<f64>,
    #[serde(default)]
    pub above_f: Option<f64>,
    pub offset_f: f64,
}

impl AdjustmentRule {
    fn matches(&self, outdoor_f: f64) -> bool {
        match (self.below_f, self.above_f) {
            (Some(below), _) if outdoor_f < below => true,
            (_, Some(above)) => outdoor_f > above,
            _ => false,
        }
    }
}

/// Shifts the comfort setpoint by outdoor temperature. First matching rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherAdjustment {
    pub rules: Vec<AdjustmentRule>,
    /// Absolute bound on any offset.
    pub max_offset_f: f64,
}

impl Default for WeatherAdjustment {
    fn default() -> Self {
        Self {
            rules: vec![
                AdjustmentRule {
                    below_f: Some(20.0),
                    above_f: None,
                    offset_f: 4.0,
                },
                AdjustmentRule {
                    below_f: Some(40.0),
                    above_f: None,
                    offset_f: 2.0,
                },
                AdjustmentRule {
                    below_f: None,
                    above_f: Some(90.0),
                    offset_f: -2.0,
                },
            ],
            max_offset_f: 4.0,
        }
    }
}

impl WeatherAdjustment {
    /// Check that every threshold and offset is finite and the bound is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAdjustment`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.max_offset_f.is_finite() || self.max_offset_f < 0.0 {
            return Err(ValidationError::InvalidAdjustment(
                "max_offset_f must be a non-negative number",
            ));
        }
        for rule in &self.rules {
            if !rule.offset_f.is_finite() {
                return Err(ValidationError::InvalidAdjustment("offset_f must be a number"));
            }
            if rule.below_f.is_some_and(|t| !t.is_finite())
                || rule.above_f.is_some_and(|t| !t.is_finite())
            {
                return Err(ValidationError::InvalidAdjustment(
                    "below_f and above_f must be numbers",
                ));
            }
        }
        Ok(())
    }

    /// Offset to apply for the given outdoor temperature, clamped to `max_offset_f`.
    ///
    /// A NaN bound or offset yields no adjustment.
    #[must_use]
    pub fn offset_for(&self, outdoor_f: f64) -> f64 {
        let bound = self.max_offset_f.abs();
        if bound.is_nan() {
            return 0.0;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(outdoor_f))
            .filter(|rule| !rule.offset_f.is_nan())
            .map_or(0.0, |rule| rule.offset_f.clamp(-bound, bound))
    }

    /// Comfort setpoint after adjustment; `None` outdoor reading keeps the baseline.
    #[must_use]
    pub fn adjust(&self, baseline_f: f64, outdoor_f: Option<f64>) -> f64 {
        outdoor_f.map_or(baseline_f, |t| baseline_f + self.offset_for(t))
    }
}
