//! Tunables for assembling a constraint model.

use serde::{Deserialize, Serialize};

use super::clock::MINUTES_PER_DAY;
use crate::error::ValidationError;

/// Narrowest allowed pickup window.
pub const MIN_WINDOW_WIDTH_MINUTES: u32 = 30;
/// Widest allowed pickup window.
pub const MAX_WINDOW_WIDTH_MINUTES: u32 = 240;

/// What to do with an arrival time that does not parse or falls outside
/// the operating interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalTimePolicy {
    /// Replace it with [`ModelConfig::default_window_start_minute`].
    #[default]
    Repair,
    /// Fail validation naming the point.
    Reject,
}

/// Parameters turning raw input into a [`ConstraintModel`](super::ConstraintModel).
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ArrivalTimePolicy, ModelConfig};
///
/// let config = ModelConfig::default()
///     .with_window_width(60)
///     .with_capacity_slack(1.5)
///     .with_arrival_time_policy(ArrivalTimePolicy::Reject);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.effective_capacity(8), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Width of each pickup window, anchored at the requested arrival.
    pub window_width_minutes: u32,
    /// Start of the operating interval, minutes since midnight.
    pub operating_start_minute: u32,
    /// End of the operating interval, minutes since midnight.
    pub operating_end_minute: u32,
    /// Window start substituted by [`ArrivalTimePolicy::Repair`].
    pub default_window_start_minute: u32,
    /// Handling of unusable arrival times.
    pub arrival_time_policy: ArrivalTimePolicy,
    /// Multiplier (≥ 1) applied to per-vehicle capacity.
    pub capacity_slack_factor: f64,
    /// Average driving speed used to derive travel times.
    pub average_speed_kmh: f64,
    /// Dwell time at each pickup.
    pub service_minutes: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            window_width_minutes: 120,
            operating_start_minute: 8 * 60,
            operating_end_minute: 16 * 60,
            default_window_start_minute: 8 * 60,
            arrival_time_policy: ArrivalTimePolicy::Repair,
            capacity_slack_factor: 1.0,
            average_speed_kmh: 30.0,
            service_minutes: 0.0,
        }
    }
}

impl ModelConfig {
    /// Sets the pickup window width.
    pub fn with_window_width(mut self, minutes: u32) -> Self {
        self.window_width_minutes = minutes;
        self
    }

    /// Sets the operating interval.
    pub fn with_operating_interval(mut self, start_minute: u32, end_minute: u32) -> Self {
        self.operating_start_minute = start_minute;
        self.operating_end_minute = end_minute;
        self
    }

    /// Sets the repaired window start.
    pub fn with_default_window_start(mut self, minute: u32) -> Self {
        self.default_window_start_minute = minute;
        self
    }

    /// Sets the arrival-time policy.
    pub fn with_arrival_time_policy(mut self, policy: ArrivalTimePolicy) -> Self {
        self.arrival_time_policy = policy;
        self
    }

    /// Sets the capacity relaxation factor.
    pub fn with_capacity_slack(mut self, factor: f64) -> Self {
        self.capacity_slack_factor = factor;
        self
    }

    /// Sets the average speed.
    pub fn with_average_speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    /// Sets the per-pickup dwell time.
    pub fn with_service_minutes(mut self, minutes: f64) -> Self {
        self.service_minutes = minutes;
        self
    }

    /// Per-vehicle capacity after applying the slack factor.
    pub fn effective_capacity(&self, capacity_per_vehicle: u32) -> u32 {
        let relaxed = (f64::from(capacity_per_vehicle) * self.capacity_slack_factor).floor();
        if relaxed >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            // non-negative and below u32::MAX after the checks in validate()
            relaxed as u32
        }
    }

    /// Checks every tunable is within its documented range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason: String| Err(ValidationError::InvalidConfig { reason });

        if !(MIN_WINDOW_WIDTH_MINUTES..=MAX_WINDOW_WIDTH_MINUTES)
            .contains(&self.window_width_minutes)
        {
            return invalid(format!(
                "window width {} min outside {MIN_WINDOW_WIDTH_MINUTES}..={MAX_WINDOW_WIDTH_MINUTES}",
                self.window_width_minutes
            ));
        }
        if self.operating_start_minute >= self.operating_end_minute
            || self.operating_end_minute > MINUTES_PER_DAY
        {
            return invalid(format!(
                "operating interval {}..{} is empty or beyond one day",
                self.operating_start_minute, self.operating_end_minute
            ));
        }
        if !(self.operating_start_minute..=self.operating_end_minute)
            .contains(&self.default_window_start_minute)
        {
            return invalid(format!(
                "default window start {} outside operating interval",
                self.default_window_start_minute
            ));
        }
        if !self.capacity_slack_factor.is_finite() || self.capacity_slack_factor < 1.0 {
            return invalid(format!(
                "capacity slack factor {} must be finite and at least 1",
                self.capacity_slack_factor
            ));
        }
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return invalid(format!(
                "average speed {} km/h must be positive",
                self.average_speed_kmh
            ));
        }
        if !self.service_minutes.is_finite() || self.service_minutes < 0.0 {
            return invalid(format!(
                "service time {} min must be non-negative",
                self.service_minutes
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_valid() {
        let config = ModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_capacity(8), 8);
        assert_eq!(config.arrival_time_policy, ArrivalTimePolicy::Repair);
    }

    #[test]
    fn test_slack_floors() {
        let config = ModelConfig::default().with_capacity_slack(1.3);
        assert_eq!(config.effective_capacity(8), 10);
        let config = ModelConfig::default().with_capacity_slack(3.0);
        assert_eq!(config.effective_capacity(8), 24);
    }

    #[rstest]
    #[case(ModelConfig::default().with_window_width(10))]
    #[case(ModelConfig::default().with_window_width(300))]
    #[case(ModelConfig::default().with_operating_interval(600, 600))]
    #[case(ModelConfig::default().with_operating_interval(480, 2000))]
    #[case(ModelConfig::default().with_default_window_start(100))]
    #[case(ModelConfig::default().with_capacity_slack(0.5))]
    #[case(ModelConfig::default().with_capacity_slack(f64::NAN))]
    #[case(ModelConfig::default().with_average_speed(0.0))]
    #[case(ModelConfig::default().with_service_minutes(-1.0))]
    fn test_invalid_configs(#[case] config: ModelConfig) {
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ModelConfig =
            serde_json::from_str(r#"{"window_width_minutes": 90, "arrival_time_policy": "reject"}"#)
                .expect("valid");
        assert_eq!(config.window_width_minutes, 90);
        assert_eq!(config.arrival_time_policy, ArrivalTimePolicy::Reject);
        assert_eq!(config.operating_start_minute, 480);
    }
}
