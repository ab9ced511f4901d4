//! Duty-time thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{RecoveryError, Result};

/// Regulatory limits checked by the rule engine.
///
/// Defaults follow the DGCA 2025 FDTL figures. Any key missing from a
/// configuration file keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleLimits {
    /// Maximum flight hours per day.
    pub max_daily_flight_time: f64,
    /// Maximum duty span per day (hours).
    pub max_daily_duty_period: f64,
    /// Minimum rest before a new duty period (hours).
    pub min_rest_period: f64,
    /// Maximum back-to-back night duties.
    pub max_consecutive_night_duties: u32,
    /// Rest that resets the night-duty counter (hours).
    pub mandatory_night_rest_hours: f64,
    /// Maximum flight hours in 7 days.
    pub weekly_flight_time_limit: f64,
}

impl Default for RuleLimits {
    fn default() -> Self {
        Self {
            max_daily_flight_time: 8.0,
            max_daily_duty_period: 12.0,
            min_rest_period: 12.0,
            max_consecutive_night_duties: 2,
            mandatory_night_rest_hours: 56.0,
            weekly_flight_time_limit: 35.0,
        }
    }
}

impl RuleLimits {
    /// Rejects non-positive or non-finite hour limits.
    pub fn validate(&self) -> Result<()> {
        let hours = [
            ("max_daily_flight_time", self.max_daily_flight_time),
            ("max_daily_duty_period", self.max_daily_duty_period),
            ("min_rest_period", self.min_rest_period),
            ("mandatory_night_rest_hours", self.mandatory_night_rest_hours),
            ("weekly_flight_time_limit", self.weekly_flight_time_limit),
        ];
        for (name, value) in hours {
            if !value.is_finite() || value <= 0.0 {
                return Err(RecoveryError::config(format!(
                    "fdtl.{name} must be a positive number of hours, got {value}"
                )));
            }
        }
        Ok(())
    }
}
