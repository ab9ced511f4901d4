//! Deterministic plan scoring.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CostWeights, PlanCostBreakdown};
use crate::error::{RecoveryError, Result};
use crate::models::{Action, ActionContext, PlannedAction};
use crate::rules::{RuleEngine, RuleLimits, ValidationResult};

/// Cost contribution of one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAction {
    /// The action's breakdown (its `total_cost` is the weighted sum).
    pub breakdown: PlanCostBreakdown,
    /// Crew check performed for a `SwapCrew`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
}

/// Scores recovery plans under fixed weights and duty-time limits.
///
/// Crew swaps are validated with the model's rule engine before scoring;
/// a failed check counts one violation. The model is immutable and holds
/// no per-call state.
///
/// # Example
/// ```
/// use u_recovery::cost::{CostModel, CostWeights};
/// use u_recovery::models::{Action, PlannedAction};
/// use u_recovery::rules::RuleLimits;
///
/// let model = CostModel::new(CostWeights::default(), RuleLimits::default());
/// let plan = vec![PlannedAction::new("6E-101", Action::delay(120.0))];
/// let breakdown = model.score_plan(&plan).unwrap();
/// assert!((breakdown.total_cost - 120.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    weights: CostWeights,
    limits: RuleLimits,
    engine: RuleEngine,
}

impl CostModel {
    /// Creates a model using the standard rule engine.
    pub fn new(weights: CostWeights, limits: RuleLimits) -> Self {
        Self {
            weights,
            limits,
            engine: RuleEngine::standard(),
        }
    }

    /// Replaces the rule engine used for crew checks.
    pub fn with_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// The configured weights.
    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    /// The configured duty-time limits.
    pub fn limits(&self) -> &RuleLimits {
        &self.limits
    }

    /// Scores a single action in its context.
    pub fn score_action(&self, action: &Action, context: &ActionContext) -> Result<ScoredAction> {
        self.weights.check()?;
        action.check()?;
        context.impact.check()?;

        let mut breakdown = PlanCostBreakdown::zero();
        let mut validation = None;

        match action {
            Action::NoAction => {}
            Action::Delay { minutes } => breakdown.total_delay_minutes = *minutes,
            Action::Cancel => breakdown.num_cancellations = 1,
            Action::SwapCrew { target_pilot } => {
                let crew = context.crew.as_ref().ok_or_else(|| {
                    RecoveryError::input(format!(
                        "swap_crew to '{target_pilot}' needs a crew assignment to validate"
                    ))
                })?;
                if !crew.pilot.id.is_empty() && crew.pilot.id != *target_pilot {
                    return Err(RecoveryError::input(format!(
                        "swap_crew targets '{target_pilot}' but the crew assignment is for '{}'",
                        crew.pilot.id
                    )));
                }
                let result =
                    self.engine
                        .validate_assignment(&crew.pilot, &crew.flight, &self.limits)?;
                if !result.compliant {
                    breakdown.num_violations = 1;
                }
                validation = Some(result);
            }
            Action::SwapAircraft { .. } | Action::Reroute { .. } | Action::Consolidate { .. } => {
                breakdown.resource_inefficiency = context.impact.inefficiency_units;
            }
        }

        breakdown.passenger_impact = context.impact.affected_passengers;
        breakdown.total_cost = breakdown.weighted_total(&self.weights);

        Ok(ScoredAction {
            breakdown,
            validation,
        })
    }

    /// Scores a plan; the breakdown is the ordered sum of its actions.
    pub fn score_plan(&self, plan: &[PlannedAction]) -> Result<PlanCostBreakdown> {
        self.weights.check()?;
        let mut total = PlanCostBreakdown::zero();
        for planned in plan {
            let scored = self.score_action(&planned.action, &planned.context)?;
            total += &scored.breakdown;
        }
        debug!(
            actions = plan.len(),
            total_cost = total.total_cost,
            violations = total.num_violations,
            "plan scored"
        );
        Ok(total)
    }
}

/// Scores a plan with the standard rule engine.
pub fn score_plan(
    plan: &[PlannedAction],
    weights: &CostWeights,
    limits: &RuleLimits,
) -> Result<PlanCostBreakdown> {
    CostModel::new(weights.clone(), limits.clone()).score_plan(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PilotState, ProposedFlight};

    fn model() -> CostModel {
        CostModel::new(CostWeights::default(), RuleLimits::default())
    }

    fn swap(pilot: PilotState) -> PlannedAction {
        let id = pilot.id.clone();
        PlannedAction::new("6E-101", Action::swap_crew(id))
            .with_context(ActionContext::none().with_crew(pilot, ProposedFlight::new(2.0)))
    }

    #[test]
    fn test_delay_and_compliant_swap() {
        let plan = vec![
            swap(PilotState::new("KUMAR").with_daily_hours(4.0)),
            PlannedAction::new("6E-102", Action::delay(120.0)),
        ];
        let b = model().score_plan(&plan).unwrap();
        assert!((b.total_delay_minutes - 120.0).abs() < 1e-10);
        assert_eq!(b.num_violations, 0);
        assert!((b.total_cost - 120.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_compliant_swap_counts_violation() {
        let scored = model()
            .score_action(
                &Action::swap_crew("VERMA"),
                &ActionContext::none().with_crew(
                    PilotState::new("VERMA").with_daily_hours(7.0),
                    ProposedFlight::new(2.0),
                ),
            )
            .unwrap();
        assert_eq!(scored.breakdown.num_violations, 1);
        assert!((scored.breakdown.total_cost - 1000.0).abs() < 1e-10);
        assert!(!scored.validation.unwrap().compliant);
    }

    #[test]
    fn test_swap_without_crew_context_is_input_error() {
        let err = model()
            .score_action(&Action::swap_crew("X"), &ActionContext::none())
            .unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_swap_target_mismatch() {
        let err = model()
            .score_action(
                &Action::swap_crew("X"),
                &ActionContext::none().with_crew(PilotState::new("Y"), ProposedFlight::new(1.0)),
            )
            .unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_resource_and_passenger_terms() {
        let ctx = ActionContext::none().with_passengers(150.0).with_inefficiency(2.0);
        let m = model();

        let reroute = m.score_action(&Action::reroute("DEL-JAI-BOM"), &ctx).unwrap();
        assert!((reroute.breakdown.resource_inefficiency - 2.0).abs() < 1e-10);
        assert!((reroute.breakdown.passenger_impact - 150.0).abs() < 1e-10);
        assert!((reroute.breakdown.total_cost - (100.0 + 1500.0)).abs() < 1e-10);

        // Inefficiency units only count for resource actions.
        let cancel = m.score_action(&Action::Cancel, &ctx).unwrap();
        assert!((cancel.breakdown.resource_inefficiency - 0.0).abs() < 1e-10);
        assert_eq!(cancel.breakdown.num_cancellations, 1);
        assert!((cancel.breakdown.total_cost - (500.0 + 1500.0)).abs() < 1e-10);
    }

    #[test]
    fn test_zero_weights() {
        let m = CostModel::new(CostWeights::zero(), RuleLimits::default());
        let plan = vec![
            PlannedAction::new("A", Action::Cancel),
            PlannedAction::new("B", Action::delay(300.0))
                .with_context(ActionContext::none().with_passengers(180.0)),
            swap(PilotState::new("VERMA").with_daily_hours(7.0)),
        ];
        let b = m.score_plan(&plan).unwrap();
        assert!((b.total_cost - 0.0).abs() < 1e-10);
        assert_eq!(b.num_cancellations, 1);
        assert_eq!(b.num_violations, 1);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let m = model();
        assert!(m
            .score_plan(&[PlannedAction::new("A", Action::delay(-10.0))])
            .unwrap_err()
            .is_input());
        assert!(m
            .score_plan(&[PlannedAction::new("A", Action::Cancel)
                .with_context(ActionContext::none().with_passengers(-3.0))])
            .unwrap_err()
            .is_input());

        let negative = CostWeights {
            w_delay: -1.0,
            ..CostWeights::default()
        };
        assert!(score_plan(&[], &negative, &RuleLimits::default())
            .unwrap_err()
            .is_input());
    }

    #[test]
    fn test_empty_plan() {
        let b = model().score_plan(&[]).unwrap();
        assert_eq!(b, PlanCostBreakdown::zero());
    }
}
