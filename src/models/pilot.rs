//! Pilot duty-time state.
//!
//! A point-in-time read of the accumulators the duty-time rules check.
//! The rule engine only ever reads it; the recovery environment updates
//! its own episode copy when a crew swap is applied.

use serde::{Deserialize, Serialize};

use crate::error::{RecoveryError, Result};

/// Duty-time accumulators for one pilot.
///
/// All hour fields are non-negative. Accumulators absent from an external
/// record default to zero (a fresh pilot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotState {
    /// Pilot identifier.
    #[serde(default, alias = "pilot_id")]
    pub id: String,
    /// Flight hours flown today.
    #[serde(default)]
    pub daily_flight_hours: f64,
    /// Flight hours flown in the current 7-day window.
    #[serde(default)]
    pub weekly_flight_hours: f64,
    /// Night duties flown back to back.
    #[serde(default)]
    pub consecutive_night_duties: u32,
    /// Hours elapsed since the pilot's last rest period ended.
    #[serde(default)]
    pub hours_since_last_rest: f64,
}

impl PilotState {
    /// Creates a fresh pilot with zeroed accumulators.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            daily_flight_hours: 0.0,
            weekly_flight_hours: 0.0,
            consecutive_night_duties: 0,
            hours_since_last_rest: 0.0,
        }
    }

    /// Sets today's flight hours.
    pub fn with_daily_hours(mut self, hours: f64) -> Self {
        self.daily_flight_hours = hours;
        self
    }

    /// Sets the weekly flight hours.
    pub fn with_weekly_hours(mut self, hours: f64) -> Self {
        self.weekly_flight_hours = hours;
        self
    }

    /// Sets the consecutive night duty count.
    pub fn with_night_duties(mut self, count: u32) -> Self {
        self.consecutive_night_duties = count;
        self
    }

    /// Sets the hours since last rest.
    pub fn with_hours_since_rest(mut self, hours: f64) -> Self {
        self.hours_since_last_rest = hours;
        self
    }

    /// Rejects negative or non-finite accumulators.
    pub fn check(&self) -> Result<()> {
        let fields = [
            ("daily_flight_hours", self.daily_flight_hours),
            ("weekly_flight_hours", self.weekly_flight_hours),
            ("hours_since_last_rest", self.hours_since_last_rest),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RecoveryError::input(format!(
                    "pilot '{}': {name} must be a non-negative number, got {value}",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Books a flown sector onto the accumulators.
    ///
    /// Night sectors extend the consecutive-night counter; day sectors
    /// reset it.
    pub(crate) fn record_flight(&mut self, duration_hours: f64, is_night_duty: bool) {
        self.daily_flight_hours += duration_hours;
        self.weekly_flight_hours += duration_hours;
        if is_night_duty {
            self.consecutive_night_duties = self.consecutive_night_duties.saturating_add(1);
        } else {
            self.consecutive_night_duties = 0;
        }
    }
}
