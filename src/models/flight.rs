//! Flight and aircraft models.
//!
//! [`ProposedFlight`] is the rule-engine view of one sector a pilot would
//! take on. [`Flight`] and [`Aircraft`] are the snapshot records the
//! recovery environment works through.
//!
//! # Time Representation
//! Departure and arrival are epoch milliseconds; the snapshot provider
//! defines the epoch.

use serde::{Deserialize, Serialize};

use crate::error::{RecoveryError, Result};

/// A sector proposed for assignment to a pilot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedFlight {
    /// Block time in hours (positive).
    pub duration_hours: f64,
    /// Whether the sector counts as a night duty.
    #[serde(default)]
    pub is_night_duty: bool,
    /// Scheduled departure (ms).
    #[serde(default)]
    pub departure_time: Option<i64>,
    /// Scheduled arrival (ms).
    #[serde(default)]
    pub arrival_time: Option<i64>,
    /// Whether this sector opens a new duty period (enables the minimum rest check).
    #[serde(default)]
    pub begins_duty_period: bool,
    /// Ground/briefing time added to the duty span (enables the duty period check).
    #[serde(default)]
    pub duty_overhead_hours: Option<f64>,
}

impl ProposedFlight {
    /// Creates a day sector of the given block time.
    pub fn new(duration_hours: f64) -> Self {
        Self {
            duration_hours,
            is_night_duty: false,
            departure_time: None,
            arrival_time: None,
            begins_duty_period: false,
            duty_overhead_hours: None,
        }
    }

    /// Marks the sector as a night duty.
    pub fn night(mut self) -> Self {
        self.is_night_duty = true;
        self
    }

    /// Sets departure and arrival times (ms).
    pub fn with_times(mut self, departure_ms: i64, arrival_ms: i64) -> Self {
        self.departure_time = Some(departure_ms);
        self.arrival_time = Some(arrival_ms);
        self
    }

    /// Marks the sector as the start of a new duty period.
    pub fn starting_duty(mut self) -> Self {
        self.begins_duty_period = true;
        self
    }

    /// Sets the non-flying duty overhead (hours).
    pub fn with_duty_overhead(mut self, hours: f64) -> Self {
        self.duty_overhead_hours = Some(hours);
        self
    }

    /// Total duty span, when the overhead is known.
    pub fn duty_span_hours(&self) -> Option<f64> {
        self.duty_overhead_hours.map(|o| self.duration_hours + o)
    }

    /// Rejects malformed sectors.
    pub fn check(&self) -> Result<()> {
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err(RecoveryError::input(format!(
                "duration_hours must be a positive number, got {}",
                self.duration_hours
            )));
        }
        if let Some(overhead) = self.duty_overhead_hours {
            if !overhead.is_finite() || overhead < 0.0 {
                return Err(RecoveryError::input(format!(
                    "duty_overhead_hours must be non-negative, got {overhead}"
                )));
            }
        }
        if let (Some(dep), Some(arr)) = (self.departure_time, self.arrival_time) {
            if arr < dep {
                return Err(RecoveryError::input(format!(
                    "arrival_time {arr} precedes departure_time {dep}"
                )));
            }
        }
        Ok(())
    }
}

/// Lifecycle of a snapshot flight inside an episode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    /// Operating as scheduled (possibly delayed).
    #[default]
    Scheduled,
    /// Cancelled by a recovery action.
    Cancelled,
    /// Passengers moved onto another flight.
    Consolidated { into: String },
}

/// A flight in the operational snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Flight number.
    pub id: String,
    /// Operating pilot.
    pub pilot_id: String,
    /// Operating aircraft (tail number).
    pub aircraft_id: String,
    /// Route designator, e.g. `DEL-BOM`.
    #[serde(default)]
    pub route: String,
    /// Block time in hours.
    pub duration_hours: f64,
    /// Whether the sector is a night duty.
    #[serde(default)]
    pub is_night_duty: bool,
    /// Booked passengers.
    #[serde(default)]
    pub passengers: u32,
    /// Scheduled departure (ms).
    #[serde(default)]
    pub departure_time: Option<i64>,
    /// Whether a replacement pilot would start a new duty period on it.
    #[serde(default)]
    pub begins_duty_period: bool,
    /// Ground/briefing overhead for the duty period check.
    #[serde(default)]
    pub duty_overhead_hours: Option<f64>,
    /// Accumulated delay (minutes).
    #[serde(default)]
    pub delay_minutes: f64,
    /// Current status.
    #[serde(default)]
    pub status: FlightStatus,
}

impl Flight {
    /// Creates a scheduled day flight.
    pub fn new(
        id: impl Into<String>,
        pilot_id: impl Into<String>,
        aircraft_id: impl Into<String>,
        duration_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            pilot_id: pilot_id.into(),
            aircraft_id: aircraft_id.into(),
            route: String::new(),
            duration_hours,
            is_night_duty: false,
            passengers: 0,
            departure_time: None,
            begins_duty_period: false,
            duty_overhead_hours: None,
            delay_minutes: 0.0,
            status: FlightStatus::Scheduled,
        }
    }

    /// Sets the route designator.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    /// Sets the booked passenger count.
    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    /// Marks the flight as a night duty.
    pub fn night(mut self) -> Self {
        self.is_night_duty = true;
        self
    }

    /// Sets the scheduled departure (ms).
    pub fn with_departure(mut self, departure_ms: i64) -> Self {
        self.departure_time = Some(departure_ms);
        self
    }

    /// Marks the flight as opening a new duty period for a swapped-in pilot.
    pub fn starting_duty(mut self) -> Self {
        self.begins_duty_period = true;
        self
    }

    /// Sets the duty overhead (hours).
    pub fn with_duty_overhead(mut self, hours: f64) -> Self {
        self.duty_overhead_hours = Some(hours);
        self
    }

    /// Whether the flight still operates.
    pub fn is_operating(&self) -> bool {
        self.status == FlightStatus::Scheduled
    }

    /// The rule-engine view of flying this sector.
    ///
    /// Fails with an input error when the arrival falls outside the
    /// epoch-millisecond range.
    pub fn as_proposed(&self) -> Result<ProposedFlight> {
        let arrival = self
            .departure_time
            .map(|dep| {
                shift_ms(dep, self.duration_hours, MS_PER_HOUR).ok_or_else(|| {
                    RecoveryError::input(format!(
                        "duration of {} hours moves arrival of flight '{}' out of range",
                        self.duration_hours, self.id
                    ))
                })
            })
            .transpose()?;
        Ok(ProposedFlight {
            duration_hours: self.duration_hours,
            is_night_duty: self.is_night_duty,
            departure_time: self.departure_time,
            arrival_time: arrival,
            begins_duty_period: self.begins_duty_period,
            duty_overhead_hours: self.duty_overhead_hours,
        })
    }

    /// Departure after a delay of `minutes`; `None` when unscheduled.
    pub fn delayed_departure(&self, minutes: f64) -> Result<Option<i64>> {
        self.departure_time
            .map(|dep| {
                shift_ms(dep, minutes, MS_PER_MINUTE).ok_or_else(|| {
                    RecoveryError::input(format!(
                        "delay of {minutes} minutes moves departure of flight '{}' out of range",
                        self.id
                    ))
                })
            })
            .transpose()
    }
}

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Shifts an epoch-ms timestamp by `amount` units of `unit_ms`, or `None`
/// when the result does not fit in an `i64`.
fn shift_ms(time: i64, amount: f64, unit_ms: f64) -> Option<i64> {
    let offset = (amount * unit_ms).round();
    // `i64::MAX as f64` rounds up to 2^63, hence the exclusive bound.
    if !offset.is_finite() || offset < i64::MIN as f64 || offset >= i64::MAX as f64 {
        return None;
    }
    time.checked_add(offset as i64)
}

/// An aircraft in the operational snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Tail number.
    #[serde(alias = "tail_number")]
    pub id: String,
    /// Predicted health score (0.0..1.0, 1.0 = fully serviceable).
    #[serde(default = "default_health")]
    pub health_score: f64,
}

fn default_health() -> f64 {
    1.0
}

impl Aircraft {
    /// Creates a fully serviceable aircraft.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            health_score: 1.0,
        }
    }

    /// Sets the health score, clamped to 0.0..1.0.
    pub fn with_health(mut self, score: f64) -> Self {
        self.health_score = score.clamp(0.0, 1.0);
        self
    }
}
