//! Recovery plan cost model.
//!
//! Turns a sequence of recovery actions into an auditable cost breakdown.
//! The breakdown is additive: the cost of a plan is the ordered sum of the
//! costs of its actions, so scoring two disjoint halves and adding them
//! gives the score of the whole plan.
//!
//! # Terms
//!
//! | Term | Contributed by | Weight |
//! |------|----------------|--------|
//! | Total delay (minutes) | `Delay` | `w_delay` |
//! | Cancellations | `Cancel` | `w_cancel` |
//! | Violations | `SwapCrew` failing the duty-time rules | `w_violation` |
//! | Resource inefficiency | `SwapAircraft`, `Reroute`, `Consolidate` | `w_resource` |
//! | Passenger impact | every action | `w_passenger` |

mod model;

pub use model::{score_plan, CostModel, ScoredAction};

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::error::{RecoveryError, Result};

/// Weights of the cost terms.
///
/// Non-negative; loaded once from configuration and never changed at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Cost per minute of delay.
    pub w_delay: f64,
    /// Cost per cancellation.
    pub w_cancel: f64,
    /// Cost per duty-time violation.
    pub w_violation: f64,
    /// Cost per resource inefficiency unit.
    pub w_resource: f64,
    /// Cost per affected passenger.
    pub w_passenger: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            w_delay: 1.0,
            w_cancel: 500.0,
            w_violation: 1000.0,
            w_resource: 50.0,
            w_passenger: 10.0,
        }
    }
}

impl CostWeights {
    /// All weights set to zero.
    pub fn zero() -> Self {
        Self {
            w_delay: 0.0,
            w_cancel: 0.0,
            w_violation: 0.0,
            w_resource: 0.0,
            w_passenger: 0.0,
        }
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("w_delay", self.w_delay),
            ("w_cancel", self.w_cancel),
            ("w_violation", self.w_violation),
            ("w_resource", self.w_resource),
            ("w_passenger", self.w_passenger),
        ]
    }

    fn first_invalid(&self) -> Option<(&'static str, f64)> {
        self.named()
            .into_iter()
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
    }

    /// Rejects negative weights passed to a scoring call.
    pub fn check(&self) -> Result<()> {
        match self.first_invalid() {
            Some((name, w)) => Err(RecoveryError::input(format!(
                "{name} must be non-negative, got {w}"
            ))),
            None => Ok(()),
        }
    }

    /// Rejects negative weights at configuration load.
    pub fn validate(&self) -> Result<()> {
        match self.first_invalid() {
            Some((name, w)) => Err(RecoveryError::config(format!(
                "cost_weights.{name} must be non-negative, got {w}"
            ))),
            None => Ok(()),
        }
    }
}

/// Cost breakdown of a plan or of a single action.
///
/// All terms are non-negative. `total_cost` is the weighted sum of the
/// terms for a single action, and the ordered sum of action totals for a
/// plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanCostBreakdown {
    /// Delay minutes across all actions.
    pub total_delay_minutes: f64,
    /// Cancelled flights.
    pub num_cancellations: u32,
    /// Crew swaps that broke a duty-time rule.
    pub num_violations: u32,
    /// Resource inefficiency units.
    pub resource_inefficiency: f64,
    /// Affected passengers.
    pub passenger_impact: f64,
    /// Weighted cost.
    pub total_cost: f64,
}

impl PlanCostBreakdown {
    /// The empty plan.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Weighted sum of the five terms under `weights`.
    pub fn weighted_total(&self, weights: &CostWeights) -> f64 {
        weights.w_delay * self.total_delay_minutes
            + weights.w_cancel * f64::from(self.num_cancellations)
            + weights.w_violation * f64::from(self.num_violations)
            + weights.w_resource * self.resource_inefficiency
            + weights.w_passenger * self.passenger_impact
    }
}

impl AddAssign<&PlanCostBreakdown> for PlanCostBreakdown {
    fn add_assign(&mut self, rhs: &PlanCostBreakdown) {
        self.total_delay_minutes += rhs.total_delay_minutes;
        self.num_cancellations += rhs.num_cancellations;
        self.num_violations += rhs.num_violations;
        self.resource_inefficiency += rhs.resource_inefficiency;
        self.passenger_impact += rhs.passenger_impact;
        self.total_cost += rhs.total_cost;
    }
}

impl Add for PlanCostBreakdown {
    type Output = PlanCostBreakdown;

    fn add(mut self, rhs: PlanCostBreakdown) -> Self::Output {
        self += &rhs;
        self
    }
}

impl<'a> Sum<&'a PlanCostBreakdown> for PlanCostBreakdown {
    fn sum<I: Iterator<Item = &'a PlanCostBreakdown>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, b| {
            acc += b;
            acc
        })
    }
}
