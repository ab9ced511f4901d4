//! Wire records for callers outside the crate.
//!
//! The orchestration layer talks to the rule engine and the cost model with
//! plain JSON maps. This module maps those maps onto the typed API and back.
//!
//! # Rule engine
//!
//! ```json
//! {"pilot_state": {"daily_flight_hours": 7.0},
//!  "proposed_flight": {"duration_hours": 2.0}}
//! ```
//! answers `{"compliant": false, "reason": "Exceeds max daily flight time of 8.0 hours."}`.
//! Pilot accumulators missing from the map count as zero; `duration_hours`
//! is required.
//!
//! # Cost model
//!
//! An ordered list of flat action records:
//!
//! ```json
//! [{"flight_id": "6E-101", "kind": "delay", "minutes": 120},
//!  {"flight_id": "6E-102", "kind": "cancel", "affected_passengers": 180}]
//! ```
//! answers with the [`PlanCostBreakdown`] fields plus `total_cost`.

use serde::{Deserialize, Serialize};

use crate::cost::{CostModel, PlanCostBreakdown};
use crate::error::{RecoveryError, Result};
use crate::models::{
    Action, ActionContext, ActionImpact, ActionKind, CrewAssignment, PilotState, PlannedAction,
    ProposedFlight,
};
use crate::rules::{RuleEngine, RuleLimits, ValidationResult};

// ======================== Rule engine ========================

/// Rule engine request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub pilot_state: PilotState,
    pub proposed_flight: ProposedFlight,
}

/// Rule engine response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub compliant: bool,
    pub reason: String,
}

impl From<ValidationResult> for AssignmentResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            compliant: result.compliant,
            reason: result.reason,
        }
    }
}

impl AssignmentRequest {
    /// Validates the request with `engine`.
    pub fn evaluate(&self, engine: &RuleEngine, limits: &RuleLimits) -> Result<AssignmentResponse> {
        engine
            .validate_assignment(&self.pilot_state, &self.proposed_flight, limits)
            .map(AssignmentResponse::from)
    }
}

/// Answers a JSON rule engine request with the standard rules.
pub fn validate_assignment_json(request: &str, limits: &RuleLimits) -> Result<String> {
    let request: AssignmentRequest = from_json(request)?;
    let response = request.evaluate(&RuleEngine::standard(), limits)?;
    to_json(&response)
}

// ======================== Cost model ========================

/// One flat action record.
///
/// `kind` is the snake_case action name; the target field matching the kind
/// must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(default)]
    pub flight_id: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pilot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_flight: Option<String>,
    #[serde(default)]
    pub affected_passengers: f64,
    #[serde(default)]
    pub inefficiency_units: f64,
    /// Pilot and sector a `swap_crew` record is checked against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<CrewAssignment>,
}

fn required(value: Option<String>, field: &str, kind: ActionKind) -> Result<String> {
    value.ok_or_else(|| {
        RecoveryError::input(format!("{} record is missing '{field}'", kind.name()))
    })
}

impl TryFrom<ActionRecord> for PlannedAction {
    type Error = RecoveryError;

    fn try_from(record: ActionRecord) -> Result<Self> {
        let kind = ActionKind::parse(&record.kind)?;
        let action = match kind {
            ActionKind::NoAction => Action::NoAction,
            ActionKind::Delay => Action::delay(record.minutes.ok_or_else(|| {
                RecoveryError::input("delay record is missing 'minutes'")
            })?),
            ActionKind::Cancel => Action::Cancel,
            ActionKind::SwapAircraft => Action::swap_aircraft(required(record.target, "target", kind)?),
            ActionKind::SwapCrew => {
                Action::swap_crew(required(record.target_pilot, "target_pilot", kind)?)
            }
            ActionKind::Reroute => Action::reroute(required(record.new_route, "new_route", kind)?),
            ActionKind::Consolidate => {
                Action::consolidate(required(record.with_flight, "with_flight", kind)?)
            }
        };

        Ok(PlannedAction::new(record.flight_id, action).with_context(ActionContext {
            impact: ActionImpact::new(record.affected_passengers, record.inefficiency_units),
            crew: record.crew,
        }))
    }
}

impl From<&PlannedAction> for ActionRecord {
    fn from(planned: &PlannedAction) -> Self {
        let mut record = ActionRecord {
            flight_id: planned.flight_id.clone(),
            kind: planned.action.kind().name().to_string(),
            affected_passengers: planned.context.impact.affected_passengers,
            inefficiency_units: planned.context.impact.inefficiency_units,
            crew: planned.context.crew.clone(),
            ..ActionRecord::default()
        };
        match &planned.action {
            Action::NoAction | Action::Cancel => {}
            Action::Delay { minutes } => record.minutes = Some(*minutes),
            Action::SwapAircraft { target } => record.target = Some(target.clone()),
            Action::SwapCrew { target_pilot } => record.target_pilot = Some(target_pilot.clone()),
            Action::Reroute { new_route } => record.new_route = Some(new_route.clone()),
            Action::Consolidate { with_flight } => record.with_flight = Some(with_flight.clone()),
        }
        record
    }
}

/// Converts records into a plan, failing on the first bad record.
pub fn plan_from_records(records: Vec<ActionRecord>) -> Result<Vec<PlannedAction>> {
    records.into_iter().map(PlannedAction::try_from).collect()
}

/// Scores a JSON list of action records.
pub fn score_plan_json(records: &str, model: &CostModel) -> Result<String> {
    let records: Vec<ActionRecord> = from_json(records)?;
    let plan = plan_from_records(records)?;
    let breakdown: PlanCostBreakdown = model.score_plan(&plan)?;
    to_json(&breakdown)
}

// ======================== JSON helpers ========================

fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| RecoveryError::input(format!("malformed request: {e}")))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| RecoveryError::input(format!("unserialisable response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostWeights;

    #[test]
    fn test_assignment_json() {
        let out = validate_assignment_json(
            r#"{"pilot_state": {"pilot_id": "VERMA", "daily_flight_hours": 7.0},
                "proposed_flight": {"duration_hours": 2.0}}"#,
            &RuleLimits::default(),
        )
        .unwrap();
        let response: AssignmentResponse = serde_json::from_str(&out).unwrap();
        assert!(!response.compliant);
        assert_eq!(response.reason, "Exceeds max daily flight time of 8.0 hours.");
    }

    #[test]
    fn test_assignment_missing_duration_is_input_error() {
        let err = validate_assignment_json(
            r#"{"pilot_state": {}, "proposed_flight": {"is_night_duty": true}}"#,
            &RuleLimits::default(),
        )
        .unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_assignment_negative_field_is_input_error() {
        let err = validate_assignment_json(
            r#"{"pilot_state": {"weekly_flight_hours": -3}, "proposed_flight": {"duration_hours": 1.0}}"#,
            &RuleLimits::default(),
        )
        .unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_score_plan_json() {
        let model = CostModel::new(CostWeights::default(), RuleLimits::default());
        let out = score_plan_json(
            r#"[
                {"flight_id": "6E-101", "kind": "swap_crew", "target_pilot": "KUMAR",
                 "crew": {"pilot_state": {"pilot_id": "KUMAR", "daily_flight_hours": 4.0},
                          "proposed_flight": {"duration_hours": 2.0}}},
                {"flight_id": "6E-102", "kind": "delay", "minutes": 120}
            ]"#,
            &model,
        )
        .unwrap();
        let breakdown: PlanCostBreakdown = serde_json::from_str(&out).unwrap();
        assert!((breakdown.total_cost - 120.0).abs() < 1e-10);
        assert_eq!(breakdown.num_violations, 0);
    }

    #[test]
    fn test_unknown_kind() {
        let record = ActionRecord {
            flight_id: "6E-101".into(),
            kind: "teleport".into(),
            ..ActionRecord::default()
        };
        let err = PlannedAction::try_from(record).unwrap_err();
        assert_eq!(err, RecoveryError::UnsupportedAction("teleport".into()));
    }

    #[test]
    fn test_missing_target() {
        let record = ActionRecord {
            kind: "swap_aircraft".into(),
            ..ActionRecord::default()
        };
        assert!(PlannedAction::try_from(record).unwrap_err().is_input());

        let record = ActionRecord {
            kind: "delay".into(),
            ..ActionRecord::default()
        };
        assert!(PlannedAction::try_from(record).unwrap_err().is_input());
    }

    #[test]
    fn test_record_conversion_preserves_plan() {
        let planned = PlannedAction::new("6E-101", Action::reroute("DEL-JAI-BOM"))
            .with_context(ActionContext::none().with_passengers(12.0).with_inefficiency(1.0));
        let record = ActionRecord::from(&planned);
        assert_eq!(record.kind, "reroute");
        assert_eq!(record.new_route.as_deref(), Some("DEL-JAI-BOM"));
        assert_eq!(PlannedAction::try_from(record).unwrap(), planned);
    }

    #[test]
    fn test_malformed_json() {
        let model = CostModel::new(CostWeights::default(), RuleLimits::default());
        assert!(score_plan_json("{not json", &model).unwrap_err().is_input());
    }
}
