//! Baseline policies and episode rollouts.
//!
//! Policies only pick actions; the environment owns all state. A policy
//! may inspect the environment's current episode (flight, pilots, aircraft)
//! to build targeted actions.
//!
//! # Policies
//!
//! | Policy | Behavior |
//! |--------|----------|
//! | [`NoActionPolicy`] | Leaves every flight as scheduled |
//! | [`RandomPolicy`] | Uniform over allowed action kinds, seeded |

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::PlanCostBreakdown;
use crate::env::{EpisodePhase, Observation, RecoveryEnvironment};
use crate::error::Result;
use crate::models::{Action, ActionKind, Snapshot};

/// Picks the action for the environment's current flight.
pub trait RecoveryPolicy {
    /// Policy name for logs and reports.
    fn name(&self) -> &str;

    /// Chooses an action given the latest observation.
    fn choose(&mut self, observation: &Observation, env: &RecoveryEnvironment) -> Action;
}

/// Always returns [`Action::NoAction`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActionPolicy;

impl RecoveryPolicy for NoActionPolicy {
    fn name(&self) -> &str {
        "no_action"
    }

    fn choose(&mut self, _observation: &Observation, _env: &RecoveryEnvironment) -> Action {
        Action::NoAction
    }
}

/// Uniformly random actions, reproducible from a seed.
///
/// Targets are drawn from the current episode, so every chosen action is
/// valid for the environment. A kind with no possible target (e.g. a
/// consolidation on the last flight) falls back to `NoAction`.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
    kinds: Vec<ActionKind>,
    max_delay_minutes: f64,
}

impl RandomPolicy {
    /// Creates a policy over all action kinds.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            kinds: ActionKind::ALL.to_vec(),
            max_delay_minutes: 180.0,
        }
    }

    /// Restricts the action kinds the policy draws from.
    pub fn with_kinds(mut self, kinds: &[ActionKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Sets the upper bound of random delays.
    pub fn with_max_delay(mut self, minutes: f64) -> Self {
        self.max_delay_minutes = minutes.max(0.0);
        self
    }

    fn build(&mut self, kind: ActionKind, env: &RecoveryEnvironment) -> Option<Action> {
        let state = env.state()?;
        let flight = state.current_flight()?;
        let snapshot = &state.snapshot;

        match kind {
            ActionKind::NoAction => Some(Action::NoAction),
            ActionKind::Delay => {
                // Whole quarter hours.
                let slots = (self.max_delay_minutes / 15.0).floor() as u32;
                let minutes = f64::from(self.rng.random_range(0..=slots)) * 15.0;
                Some(Action::delay(minutes))
            }
            ActionKind::Cancel => Some(Action::Cancel),
            ActionKind::SwapAircraft => snapshot
                .aircraft
                .choose(&mut self.rng)
                .map(|a| Action::swap_aircraft(a.id.clone())),
            ActionKind::SwapCrew => snapshot
                .pilots
                .choose(&mut self.rng)
                .map(|p| Action::swap_crew(p.id.clone())),
            ActionKind::Reroute => {
                let base = if flight.route.is_empty() {
                    flight.id.as_str()
                } else {
                    flight.route.as_str()
                };
                Some(Action::reroute(format!("{base}-ALT")))
            }
            ActionKind::Consolidate => {
                let later: Vec<&str> = snapshot.flights[state.pointer + 1..]
                    .iter()
                    .filter(|f| f.is_operating())
                    .map(|f| f.id.as_str())
                    .collect();
                later.choose(&mut self.rng).map(|id| Action::consolidate(*id))
            }
        }
    }
}

impl RecoveryPolicy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, _observation: &Observation, env: &RecoveryEnvironment) -> Action {
        let Some(kind) = self.kinds.choose(&mut self.rng).copied() else {
            return Action::NoAction;
        };
        self.build(kind, env).unwrap_or(Action::NoAction)
    }
}

/// A crew swap that broke a duty-time rule during a rollout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewViolation {
    pub flight_id: String,
    pub reason: String,
}

/// Outcome of one rollout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub policy: String,
    pub steps: usize,
    /// Sum of step rewards; equals `-breakdown.total_cost`.
    pub total_reward: f64,
    pub breakdown: PlanCostBreakdown,
    pub violations: Vec<CrewViolation>,
}

/// Runs `policy` on `snapshot` until the episode is done.
pub fn run_episode<P: RecoveryPolicy + ?Sized>(
    env: &mut RecoveryEnvironment,
    snapshot: Snapshot,
    policy: &mut P,
) -> Result<EpisodeSummary> {
    let mut observation = env.reset(snapshot)?;
    let mut total_reward = 0.0;
    let mut steps = 0;
    let mut violations = Vec::new();

    while env.phase() != Some(EpisodePhase::Done) {
        let action = policy.choose(&observation, env);
        let result = env.step(action)?;

        total_reward += result.reward;
        steps += 1;
        if let Some(validation) = result.info.validation.filter(|v| !v.compliant) {
            violations.push(CrewViolation {
                flight_id: result.info.flight_id,
                reason: validation.reason,
            });
        }
        observation = result.observation;
    }

    let breakdown = env.breakdown().cloned().unwrap_or_default();
    debug!(
        policy = policy.name(),
        steps,
        total_reward,
        "rollout complete"
    );

    Ok(EpisodeSummary {
        policy: policy.name().to_string(),
        steps,
        total_reward,
        breakdown,
        violations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecoveryConfig;
    use crate::models::{Aircraft, Flight, PilotState};

    fn snapshot() -> Snapshot {
        Snapshot::new()
            .with_pilot(PilotState::new("VERMA").with_daily_hours(7.0))
            .with_pilot(PilotState::new("KUMAR").with_daily_hours(4.0))
            .with_aircraft(Aircraft::new("VT-IFA"))
            .with_flight(Flight::new("6E-101", "KUMAR", "VT-IFA", 2.0).with_passengers(120))
            .with_flight(Flight::new("6E-102", "KUMAR", "VT-IFA", 1.0).with_passengers(80))
            .with_flight(Flight::new("6E-103", "VERMA", "VT-IFA", 0.5).with_passengers(60))
    }

    fn env() -> RecoveryEnvironment {
        RecoveryEnvironment::new(RecoveryConfig::default()).unwrap()
    }

    #[test]
    fn test_no_action_rollout_is_free() {
        let summary = run_episode(&mut env(), snapshot(), &mut NoActionPolicy).unwrap();
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.policy, "no_action");
        assert!((summary.total_reward - 0.0).abs() < 1e-10);
        assert!(summary.violations.is_empty());
    }

    #[test]
    fn test_random_rollout_matches_breakdown() {
        let mut env = env();
        let summary = run_episode(&mut env, snapshot(), &mut RandomPolicy::new(7)).unwrap();
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.total_reward, -summary.breakdown.total_cost);
        assert_eq!(summary.violations.len() as u32, summary.breakdown.num_violations);

        let rescored = env.cost_model().score_plan(env.episode_plan()).unwrap();
        assert_eq!(rescored, summary.breakdown);
    }

    #[test]
    fn test_random_policy_is_reproducible() {
        let a = run_episode(&mut env(), snapshot(), &mut RandomPolicy::new(42)).unwrap();
        let b = run_episode(&mut env(), snapshot(), &mut RandomPolicy::new(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_restricted_kinds() {
        let mut env = env();
        let mut policy = RandomPolicy::new(1).with_kinds(&[ActionKind::SwapCrew]);
        let summary = run_episode(&mut env, snapshot(), &mut policy).unwrap();
        assert!(env
            .episode_plan()
            .iter()
            .all(|p| p.action.kind() == ActionKind::SwapCrew));
        assert_eq!(summary.steps, 3);
    }

    #[test]
    fn test_delay_bounds() {
        let mut env = env();
        let mut policy = RandomPolicy::new(3)
            .with_kinds(&[ActionKind::Delay])
            .with_max_delay(60.0);
        run_episode(&mut env, snapshot(), &mut policy).unwrap();
        for planned in env.episode_plan() {
            match planned.action {
                Action::Delay { minutes } => {
                    assert!((0.0..=60.0).contains(&minutes));
                    assert!((minutes % 15.0).abs() < 1e-10);
                }
                ref other => panic!("unexpected action {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_kinds_fall_back_to_no_action() {
        let mut policy = RandomPolicy::new(0).with_kinds(&[]);
        let summary = run_episode(&mut env(), snapshot(), &mut policy).unwrap();
        assert!((summary.total_reward - 0.0).abs() < 1e-10);
    }
}
