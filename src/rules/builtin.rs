//! Built-in duty-time rules.
//!
//! # Categories
//!
//! - **Flight time**: daily and weekly cumulative block hours
//! - **Fatigue**: consecutive night duties, minimum rest
//! - **Duty**: daily duty period span
//!
//! Limits are compared with a small tolerance so that sums such as
//! `6.1 + 1.9` are not rejected for floating-point noise.

use super::{FdtlRule, RuleId, RuleLimits, RuleOutcome};
use crate::models::{PilotState, ProposedFlight};

const HOURS_EPSILON: f64 = 1e-9;

fn exceeds(value: f64, limit: f64) -> bool {
    value > limit + HOURS_EPSILON
}

/// Formats a limit in hours with at least one decimal and no rounding.
fn hours(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// ======================== Flight time rules ========================

/// Daily flight time.
///
/// `daily_flight_hours + duration_hours <= max_daily_flight_time`.
#[derive(Debug, Clone, Copy)]
pub struct DailyFlightTime;

impl FdtlRule for DailyFlightTime {
    fn id(&self) -> RuleId {
        RuleId::DailyFlightTime
    }

    fn evaluate(
        &self,
        pilot: &PilotState,
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> RuleOutcome {
        if exceeds(
            pilot.daily_flight_hours + flight.duration_hours,
            limits.max_daily_flight_time,
        ) {
            return RuleOutcome::Violated(format!(
                "Exceeds max daily flight time of {} hours.",
                hours(limits.max_daily_flight_time)
            ));
        }
        RuleOutcome::Pass
    }
}

/// Weekly flight time.
///
/// `weekly_flight_hours + duration_hours <= weekly_flight_time_limit`.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyFlightTime;

impl FdtlRule for WeeklyFlightTime {
    fn id(&self) -> RuleId {
        RuleId::WeeklyFlightTime
    }

    fn evaluate(
        &self,
        pilot: &PilotState,
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> RuleOutcome {
        if exceeds(
            pilot.weekly_flight_hours + flight.duration_hours,
            limits.weekly_flight_time_limit,
        ) {
            return RuleOutcome::Violated(format!(
                "Exceeds {}-hour weekly flight limit.",
                hours(limits.weekly_flight_time_limit)
            ));
        }
        RuleOutcome::Pass
    }
}

// ======================== Fatigue rules ========================

/// Consecutive night duties.
///
/// A night sector may extend the run to at most
/// `max_consecutive_night_duties`. A pilot who has been off for at least
/// `mandatory_night_rest_hours` starts a fresh run.
#[derive(Debug, Clone, Copy)]
pub struct ConsecutiveNightDuties;

impl FdtlRule for ConsecutiveNightDuties {
    fn id(&self) -> RuleId {
        RuleId::ConsecutiveNightDuties
    }

    fn evaluate(
        &self,
        pilot: &PilotState,
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> RuleOutcome {
        if !flight.is_night_duty {
            return RuleOutcome::NotApplicable;
        }
        if pilot.hours_since_last_rest + HOURS_EPSILON >= limits.mandatory_night_rest_hours {
            return RuleOutcome::Pass;
        }
        // The sector would make the run one longer than the limit.
        if pilot.consecutive_night_duties >= limits.max_consecutive_night_duties {
            return RuleOutcome::Violated(format!(
                "Rule violation: {} consecutive night duties require {}h rest.",
                pilot.consecutive_night_duties,
                hours(limits.mandatory_night_rest_hours)
            ));
        }
        RuleOutcome::Pass
    }
}

/// Minimum rest before a new duty period.
///
/// Only applies to sectors the caller marks as opening a duty period.
#[derive(Debug, Clone, Copy)]
pub struct MinimumRest;

impl FdtlRule for MinimumRest {
    fn id(&self) -> RuleId {
        RuleId::MinimumRest
    }

    fn evaluate(
        &self,
        pilot: &PilotState,
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> RuleOutcome {
        if !flight.begins_duty_period {
            return RuleOutcome::NotApplicable;
        }
        if pilot.hours_since_last_rest + HOURS_EPSILON < limits.min_rest_period {
            return RuleOutcome::Violated(format!(
                "Insufficient rest: {:.1}h since last rest, minimum {}h required.",
                pilot.hours_since_last_rest,
                hours(limits.min_rest_period)
            ));
        }
        RuleOutcome::Pass
    }
}

// ======================== Duty rules ========================

/// Daily duty period.
///
/// Block time plus caller-supplied ground/briefing overhead. Skipped when
/// the overhead is unknown.
#[derive(Debug, Clone, Copy)]
pub struct DailyDutyPeriod;

impl FdtlRule for DailyDutyPeriod {
    fn id(&self) -> RuleId {
        RuleId::DailyDutyPeriod
    }

    fn evaluate(
        &self,
        _pilot: &PilotState,
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> RuleOutcome {
        match flight.duty_span_hours() {
            None => RuleOutcome::NotApplicable,
            Some(span) if exceeds(span, limits.max_daily_duty_period) => {
                RuleOutcome::Violated(format!(
                    "Exceeds max daily duty period of {} hours.",
                    hours(limits.max_daily_duty_period)
                ))
            }
            Some(_) => RuleOutcome::Pass,
        }
    }
}
