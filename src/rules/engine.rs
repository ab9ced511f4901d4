//! Ordered rule engine for crew assignments.
//!
//! Holds one canonical, ordered rule list. Stricter or narrower checks
//! (e.g. a guardrail pass) are built with [`RuleEngine::restricted_to`]
//! from the same rule objects rather than from a second implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builtin::{
    ConsecutiveNightDuties, DailyDutyPeriod, DailyFlightTime, MinimumRest, WeeklyFlightTime,
};
use super::{FdtlRule, RuleId, RuleLimits, RuleOutcome, RuleViolation, ValidationResult};
use crate::error::Result;
use crate::models::{PilotState, ProposedFlight};

/// Catalogue entry for one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub id: RuleId,
    pub code: String,
    pub description: String,
}

/// An ordered, short-circuiting duty-time rule engine.
///
/// The engine is immutable once built and holds no per-call state, so one
/// instance can be shared across threads.
///
/// # Example
/// ```
/// use u_recovery::rules::{RuleEngine, RuleId};
///
/// let engine = RuleEngine::standard();
/// let guardrail = engine.restricted_to(&[RuleId::DailyFlightTime, RuleId::WeeklyFlightTime]);
/// assert_eq!(guardrail.rule_ids(), vec![RuleId::DailyFlightTime, RuleId::WeeklyFlightTime]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn FdtlRule>>,
}

impl RuleEngine {
    /// Creates an engine with no rules (every assignment is compliant).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates the engine with the five standard rules in canonical order.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(DailyFlightTime)
            .with_rule(WeeklyFlightTime)
            .with_rule(ConsecutiveNightDuties)
            .with_rule(MinimumRest)
            .with_rule(DailyDutyPeriod)
    }

    /// Appends a rule; it is evaluated after all rules added before it.
    pub fn with_rule<R: FdtlRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// A sub-engine keeping only `ids`, in this engine's order.
    pub fn restricted_to(&self, ids: &[RuleId]) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|r| ids.contains(&r.id()))
                .cloned()
                .collect(),
        }
    }

    /// Rule identifiers in evaluation order.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Catalogue of the engine's rules in evaluation order.
    pub fn catalogue(&self) -> Vec<RuleDescriptor> {
        self.rules
            .iter()
            .map(|r| {
                let id = r.id();
                RuleDescriptor {
                    id,
                    code: id.code().to_string(),
                    description: id.description().to_string(),
                }
            })
            .collect()
    }

    /// Decides whether `pilot` may fly `flight`.
    ///
    /// Returns the first violated rule, or a compliant result when every
    /// applicable rule holds. Malformed input is an error, never a
    /// compliance verdict.
    pub fn validate_assignment(
        &self,
        pilot: &PilotState,
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> Result<ValidationResult> {
        check_inputs(pilot, flight)?;

        for rule in &self.rules {
            match rule.evaluate(pilot, flight, limits) {
                RuleOutcome::Violated(reason) => {
                    debug!(
                        pilot = %pilot.id,
                        rule = rule.id().code(),
                        %reason,
                        "assignment rejected"
                    );
                    return Ok(ValidationResult::violation(rule.id(), reason));
                }
                RuleOutcome::Pass | RuleOutcome::NotApplicable => {}
            }
        }

        debug!(pilot = %pilot.id, "assignment compliant");
        Ok(ValidationResult::compliant())
    }

    /// Evaluates every rule and returns all violations in order.
    pub fn audit_assignment(
        &self,
        pilot: &PilotState,
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> Result<Vec<RuleViolation>> {
        check_inputs(pilot, flight)?;

        Ok(self
            .rules
            .iter()
            .filter_map(|rule| match rule.evaluate(pilot, flight, limits) {
                RuleOutcome::Violated(reason) => Some(RuleViolation {
                    rule: rule.id(),
                    reason,
                }),
                RuleOutcome::Pass | RuleOutcome::NotApplicable => None,
            })
            .collect())
    }

    /// Index and result of the first candidate who may fly `flight`.
    ///
    /// Candidates are tried in order; a malformed candidate aborts the
    /// search with an error rather than being skipped.
    pub fn first_compliant(
        &self,
        candidates: &[PilotState],
        flight: &ProposedFlight,
        limits: &RuleLimits,
    ) -> Result<Option<(usize, ValidationResult)>> {
        for (idx, pilot) in candidates.iter().enumerate() {
            let result = self.validate_assignment(pilot, flight, limits)?;
            if result.compliant {
                return Ok(Some((idx, result)));
            }
        }
        Ok(None)
    }
}

fn check_inputs(pilot: &PilotState, flight: &ProposedFlight) -> Result<()> {
    pilot.check()?;
    flight.check()
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.id().code()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Validates one assignment with the standard rule set.
pub fn validate_assignment(
    pilot: &PilotState,
    flight: &ProposedFlight,
    limits: &RuleLimits,
) -> Result<ValidationResult> {
    RuleEngine::standard().validate_assignment(pilot, flight, limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecoveryError;

    fn limits() -> RuleLimits {
        RuleLimits::default()
    }

    #[test]
    fn test_daily_limit_exceeded() {
        let pilot = PilotState::new("PLT_VERMA").with_daily_hours(7.0);
        let result = validate_assignment(&pilot, &ProposedFlight::new(2.0), &limits()).unwrap();
        assert_eq!(
            result.as_tuple(),
            (false, "Exceeds max daily flight time of 8.0 hours.")
        );
        assert_eq!(result.violated_rule, Some(RuleId::DailyFlightTime));
    }

    #[test]
    fn test_daily_limit_compliant() {
        let pilot = PilotState::new("PLT_KUMAR").with_daily_hours(4.0);
        let result = validate_assignment(&pilot, &ProposedFlight::new(2.0), &limits()).unwrap();
        assert_eq!(result, ValidationResult::compliant());
    }

    #[test]
    fn test_earlier_rule_wins() {
        // Daily, weekly and night rules all fail; daily is reported.
        let pilot = PilotState::new("P")
            .with_daily_hours(7.5)
            .with_weekly_hours(34.5)
            .with_night_duties(3);
        let flight = ProposedFlight::new(1.0).night();
        let result = validate_assignment(&pilot, &flight, &limits()).unwrap();
        assert_eq!(result.violated_rule, Some(RuleId::DailyFlightTime));

        // Night before minimum rest.
        let pilot = PilotState::new("P").with_night_duties(2).with_hours_since_rest(4.0);
        let flight = ProposedFlight::new(1.0).night().starting_duty();
        let result = validate_assignment(&pilot, &flight, &limits()).unwrap();
        assert_eq!(result.violated_rule, Some(RuleId::ConsecutiveNightDuties));
    }

    #[test]
    fn test_audit_reports_all_violations() {
        let pilot = PilotState::new("P")
            .with_daily_hours(7.5)
            .with_weekly_hours(34.5)
            .with_night_duties(3)
            .with_hours_since_rest(2.0);
        let flight = ProposedFlight::new(1.0)
            .night()
            .starting_duty()
            .with_duty_overhead(20.0);
        let engine = RuleEngine::standard();

        let audit = engine.audit_assignment(&pilot, &flight, &limits()).unwrap();
        let ids: Vec<RuleId> = audit.iter().map(|v| v.rule).collect();
        assert_eq!(ids, RuleId::STANDARD_ORDER.to_vec());

        let first = engine.validate_assignment(&pilot, &flight, &limits()).unwrap();
        assert_eq!(first.reason, audit[0].reason);
    }

    #[test]
    fn test_restricted_engine_keeps_order() {
        let engine = RuleEngine::standard();
        let guard = engine.restricted_to(&[RuleId::DailyDutyPeriod, RuleId::WeeklyFlightTime]);
        assert_eq!(
            guard.rule_ids(),
            vec![RuleId::WeeklyFlightTime, RuleId::DailyDutyPeriod]
        );

        // Daily limit is not part of the guardrail subset.
        let pilot = PilotState::new("P").with_daily_hours(7.0);
        let result = guard
            .validate_assignment(&pilot, &ProposedFlight::new(2.0), &limits())
            .unwrap();
        assert!(result.compliant);
    }

    #[test]
    fn test_malformed_input_is_error_not_verdict() {
        let engine = RuleEngine::standard();
        let bad_pilot = PilotState::new("P").with_daily_hours(-1.0);
        let err = engine
            .validate_assignment(&bad_pilot, &ProposedFlight::new(2.0), &limits())
            .unwrap_err();
        assert!(matches!(err, RecoveryError::Input(_)));

        let err = engine
            .validate_assignment(&PilotState::new("P"), &ProposedFlight::new(0.0), &limits())
            .unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_first_compliant() {
        let flight = ProposedFlight::new(2.0);
        let candidates = vec![
            PilotState::new("VERMA").with_daily_hours(7.0),
            PilotState::new("KUMAR").with_daily_hours(4.0),
            PilotState::new("SINGH"),
        ];
        let engine = RuleEngine::standard();

        let (idx, result) = engine
            .first_compliant(&candidates, &flight, &limits())
            .unwrap()
            .unwrap();
        assert_eq!(idx, 1);
        assert!(result.compliant);

        let none = engine
            .first_compliant(&candidates[..1], &flight, &limits())
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_empty_engine_is_compliant() {
        let pilot = PilotState::new("P").with_daily_hours(100.0);
        let result = RuleEngine::new()
            .validate_assignment(&pilot, &ProposedFlight::new(2.0), &limits())
            .unwrap();
        assert!(result.compliant);
    }

    #[test]
    fn test_catalogue() {
        let catalogue = RuleEngine::standard().catalogue();
        assert_eq!(catalogue.len(), 5);
        assert_eq!(catalogue[0].code, "max_daily_flight_time");
        assert_eq!(catalogue[2].code, "rule_48_hour_rest");
    }

    #[test]
    fn test_custom_limits() {
        let strict = RuleLimits {
            max_daily_flight_time: 5.0,
            ..RuleLimits::default()
        };
        let pilot = PilotState::new("P").with_daily_hours(4.0);
        let result = validate_assignment(&pilot, &ProposedFlight::new(2.0), &strict).unwrap();
        assert_eq!(result.reason, "Exceeds max daily flight time of 5.0 hours.");
    }
}
