//! Flight and duty time limitation (FDTL) rules and rule engine.
//!
//! Decides whether one pilot may legally take on one more sector. Rules are
//! evaluated in a fixed order and the first violation wins, so two rules
//! failing together always report the earlier one.
//!
//! # Usage
//!
//! ```
//! use u_recovery::models::{PilotState, ProposedFlight};
//! use u_recovery::rules::{RuleEngine, RuleLimits};
//!
//! let engine = RuleEngine::standard();
//! let pilot = PilotState::new("PLT001").with_daily_hours(7.0);
//! let result = engine
//!     .validate_assignment(&pilot, &ProposedFlight::new(2.0), &RuleLimits::default())
//!     .unwrap();
//! assert!(!result.compliant);
//! assert_eq!(result.reason, "Exceeds max daily flight time of 8.0 hours.");
//! ```
//!
//! # Evaluation Order
//!
//! 1. Daily flight time
//! 2. Weekly flight time
//! 3. Consecutive night duties (night sectors only)
//! 4. Minimum rest (sectors opening a duty period only)
//! 5. Daily duty period (sectors with known duty overhead only)

mod builtin;
mod engine;
mod limits;

pub use builtin::{
    ConsecutiveNightDuties, DailyDutyPeriod, DailyFlightTime, MinimumRest, WeeklyFlightTime,
};
pub use engine::{validate_assignment, RuleDescriptor, RuleEngine};
pub use limits::RuleLimits;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{PilotState, ProposedFlight};

/// Stable identifier of a duty-time rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "max_daily_flight_time")]
    DailyFlightTime,
    #[serde(rename = "weekly_flight_limit")]
    WeeklyFlightTime,
    #[serde(rename = "rule_48_hour_rest")]
    ConsecutiveNightDuties,
    #[serde(rename = "min_rest_period")]
    MinimumRest,
    #[serde(rename = "max_daily_duty_period")]
    DailyDutyPeriod,
}

impl RuleId {
    /// Standard rules in evaluation order.
    pub const STANDARD_ORDER: [RuleId; 5] = [
        RuleId::DailyFlightTime,
        RuleId::WeeklyFlightTime,
        RuleId::ConsecutiveNightDuties,
        RuleId::MinimumRest,
        RuleId::DailyDutyPeriod,
    ];

    /// Programmatic rule code.
    pub fn code(self) -> &'static str {
        match self {
            RuleId::DailyFlightTime => "max_daily_flight_time",
            RuleId::WeeklyFlightTime => "weekly_flight_limit",
            RuleId::ConsecutiveNightDuties => "rule_48_hour_rest",
            RuleId::MinimumRest => "min_rest_period",
            RuleId::DailyDutyPeriod => "max_daily_duty_period",
        }
    }

    /// One-line summary of the regulation.
    pub fn description(self) -> &'static str {
        match self {
            RuleId::DailyFlightTime => "Daily flight time may not exceed the daily limit.",
            RuleId::WeeklyFlightTime => "Flight time in any 7 days may not exceed the weekly limit.",
            RuleId::ConsecutiveNightDuties => {
                "Consecutive night duties beyond the limit require the mandatory night rest."
            }
            RuleId::MinimumRest => "A new duty period may only start after the minimum rest.",
            RuleId::DailyDutyPeriod => "A duty period may not exceed the daily duty limit.",
        }
    }
}

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The rule holds.
    Pass,
    /// The rule does not apply to this sector.
    NotApplicable,
    /// The rule is broken, with the reason.
    Violated(String),
}

/// A duty-time rule.
///
/// Rules are pure: they read the pilot, sector and limits and never keep
/// state between calls. Inputs have already been checked by the engine.
pub trait FdtlRule: Send + Sync + Debug {
    /// Rule identifier.
    fn id(&self) -> RuleId;

    /// Evaluates the rule.
    fn evaluate(&self, pilot: &PilotState, flight: &ProposedFlight, limits: &RuleLimits)
        -> RuleOutcome;
}

/// Result of validating one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether every applicable rule holds.
    pub compliant: bool,
    /// `"Compliant"`, or the first violated rule's message.
    pub reason: String,
    /// The first violated rule, for programmatic handling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violated_rule: Option<RuleId>,
}

impl ValidationResult {
    /// Reason string of a compliant result.
    pub const COMPLIANT: &'static str = "Compliant";

    /// A compliant result.
    pub fn compliant() -> Self {
        Self {
            compliant: true,
            reason: Self::COMPLIANT.to_string(),
            violated_rule: None,
        }
    }

    /// A non-compliant result.
    pub fn violation(rule: RuleId, reason: impl Into<String>) -> Self {
        Self {
            compliant: false,
            reason: reason.into(),
            violated_rule: Some(rule),
        }
    }

    /// `(compliant, reason)` pair.
    pub fn as_tuple(&self) -> (bool, &str) {
        (self.compliant, &self.reason)
    }
}

/// One broken rule, as reported by a full audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule: RuleId,
    pub reason: String,
}
