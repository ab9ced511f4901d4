//! Step-wise disruption recovery environment.
//!
//! Works through the flights of an operational snapshot one at a time. A
//! policy picks an [`Action`] for the current flight, the environment
//! applies it to its working copy of the snapshot, scores it with the same
//! [`CostModel`] used for batch scoring, and advances.
//!
//! # Episode
//!
//! - `reset(snapshot)` validates and copies the snapshot, zeroes the
//!   running breakdown and returns the first [`Observation`].
//! - `step(action)` returns a [`StepResult`]; `reward` is the negative
//!   cost of this step only.
//!
//! Summing the rewards of an episode gives exactly
//! `-score_plan(episode_plan()).total_cost`: both sides add the same
//! per-action totals in the same order.
//!
//! # Invalid steps
//!
//! A malformed action or a target missing from the snapshot is an
//! [`RecoveryError::Input`] and leaves the episode untouched. A crew swap
//! that breaks a duty-time rule is *not* rejected; it is applied and
//! charged one violation.

mod episode;
pub mod observation;

pub use episode::{EpisodePhase, EpisodeState};
pub use observation::{Observation, OBS_DIM, OBS_VERSION};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RecoveryConfig;
use crate::cost::{CostModel, PlanCostBreakdown};
use crate::error::{RecoveryError, Result};
use crate::models::{
    Action, ActionContext, ActionKind, CrewAssignment, Flight, FlightStatus, PlannedAction,
    Snapshot,
};
use crate::rules::{RuleEngine, RuleLimits, ValidationResult};
use crate::validation::validate_snapshot;

// ======================== Settings ========================

/// How a step's impact is derived from the flight it applies to.
///
/// Affected passengers are `flight.passengers * share`; inefficiency units
/// only apply to resource actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactProfile {
    pub no_action_passenger_share: f64,
    pub delay_passenger_share: f64,
    pub cancel_passenger_share: f64,
    pub swap_aircraft_passenger_share: f64,
    pub swap_crew_passenger_share: f64,
    pub reroute_passenger_share: f64,
    pub consolidate_passenger_share: f64,
    /// Inefficiency units charged per aircraft swap.
    pub swap_aircraft_units: f64,
    /// Inefficiency units charged per reroute.
    pub reroute_units: f64,
    /// Inefficiency units charged per consolidation.
    pub consolidate_units: f64,
}

impl Default for ImpactProfile {
    fn default() -> Self {
        Self {
            no_action_passenger_share: 0.0,
            delay_passenger_share: 1.0,
            cancel_passenger_share: 1.0,
            swap_aircraft_passenger_share: 0.0,
            swap_crew_passenger_share: 0.0,
            reroute_passenger_share: 1.0,
            consolidate_passenger_share: 1.0,
            swap_aircraft_units: 1.0,
            reroute_units: 1.0,
            consolidate_units: 1.0,
        }
    }
}

impl ImpactProfile {
    /// A profile charging no passenger or resource impact.
    pub fn none() -> Self {
        Self {
            no_action_passenger_share: 0.0,
            delay_passenger_share: 0.0,
            cancel_passenger_share: 0.0,
            swap_aircraft_passenger_share: 0.0,
            swap_crew_passenger_share: 0.0,
            reroute_passenger_share: 0.0,
            consolidate_passenger_share: 0.0,
            swap_aircraft_units: 0.0,
            reroute_units: 0.0,
            consolidate_units: 0.0,
        }
    }

    /// Share of a flight's passengers affected by `kind`.
    pub fn passenger_share(&self, kind: ActionKind) -> f64 {
        match kind {
            ActionKind::NoAction => self.no_action_passenger_share,
            ActionKind::Delay => self.delay_passenger_share,
            ActionKind::Cancel => self.cancel_passenger_share,
            ActionKind::SwapAircraft => self.swap_aircraft_passenger_share,
            ActionKind::SwapCrew => self.swap_crew_passenger_share,
            ActionKind::Reroute => self.reroute_passenger_share,
            ActionKind::Consolidate => self.consolidate_passenger_share,
        }
    }

    /// Inefficiency units charged for `kind`.
    pub fn inefficiency_units(&self, kind: ActionKind) -> f64 {
        match kind {
            ActionKind::SwapAircraft => self.swap_aircraft_units,
            ActionKind::Reroute => self.reroute_units,
            ActionKind::Consolidate => self.consolidate_units,
            _ => 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for kind in ActionKind::ALL {
            let share = self.passenger_share(kind);
            if !(0.0..=1.0).contains(&share) {
                return Err(RecoveryError::config(format!(
                    "environment.impact.{}_passenger_share must be within 0..1, got {share}",
                    kind.name()
                )));
            }
            let units = self.inefficiency_units(kind);
            if !units.is_finite() || units < 0.0 {
                return Err(RecoveryError::config(format!(
                    "environment.impact.{}_units must be non-negative, got {units}",
                    kind.name()
                )));
            }
        }
        Ok(())
    }
}

/// Episode settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSettings {
    /// Step horizon; `None` runs until every flight is processed.
    pub max_steps: Option<usize>,
    pub impact: ImpactProfile,
}

impl EnvironmentSettings {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_impact(mut self, impact: ImpactProfile) -> Self {
        self.impact = impact;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_steps == Some(0) {
            return Err(RecoveryError::config(
                "environment.max_steps must be at least 1",
            ));
        }
        self.impact.validate()
    }
}

// ======================== Step output ========================

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    AllFlightsProcessed,
    HorizonReached,
}

/// Additional information returned from a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Flight the action was applied to.
    pub flight_id: String,
    /// Steps taken so far, this one included.
    pub step: usize,
    pub action_kind: ActionKind,
    /// Crew check if this step was a `SwapCrew`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    /// This step's cost contribution.
    pub delta: PlanCostBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_reason: Option<TerminationReason>,
}

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    /// Negative cost of this step.
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

// ======================== Environment ========================

/// Single-episode recovery environment.
///
/// Not meant to be shared: run one instance per concurrent episode.
///
/// # Example
/// ```
/// use u_recovery::config::RecoveryConfig;
/// use u_recovery::env::RecoveryEnvironment;
/// use u_recovery::models::{Action, Aircraft, Flight, PilotState, Snapshot};
///
/// let snapshot = Snapshot::new()
///     .with_pilot(PilotState::new("PLT001"))
///     .with_aircraft(Aircraft::new("VT-IFA"))
///     .with_flight(Flight::new("6E-101", "PLT001", "VT-IFA", 2.0));
///
/// let mut env = RecoveryEnvironment::new(RecoveryConfig::default()).unwrap();
/// env.reset(snapshot).unwrap();
/// let result = env.step(Action::delay(30.0)).unwrap();
/// assert!(result.done);
/// assert!((result.reward + 30.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct RecoveryEnvironment {
    model: CostModel,
    settings: EnvironmentSettings,
    state: Option<EpisodeState>,
}

impl RecoveryEnvironment {
    /// Creates an environment from a validated configuration.
    pub fn new(config: RecoveryConfig) -> Result<Self> {
        config.validate()?;
        let RecoveryConfig {
            fdtl,
            cost_weights,
            environment,
        } = config;
        Ok(Self {
            model: CostModel::new(cost_weights, fdtl),
            settings: environment,
            state: None,
        })
    }

    /// Replaces the rule engine used for crew checks.
    pub fn with_engine(mut self, engine: RuleEngine) -> Self {
        self.model = self.model.with_engine(engine);
        self
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.model
    }

    pub fn settings(&self) -> &EnvironmentSettings {
        &self.settings
    }

    pub fn limits(&self) -> &RuleLimits {
        self.model.limits()
    }

    /// Current episode, if `reset` has been called.
    pub fn state(&self) -> Option<&EpisodeState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Option<EpisodePhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    /// Running breakdown of the current episode.
    pub fn breakdown(&self) -> Option<&PlanCostBreakdown> {
        self.state.as_ref().map(|s| &s.breakdown)
    }

    /// Actions applied so far with the context they were scored in.
    ///
    /// Re-scoring this plan with [`CostModel::score_plan`] reproduces
    /// [`breakdown`](Self::breakdown) exactly.
    pub fn episode_plan(&self) -> &[PlannedAction] {
        self.state
            .as_ref()
            .map(|s| s.plan.as_slice())
            .unwrap_or(&[])
    }

    /// Observation of the current episode.
    pub fn observation(&self) -> Result<Observation> {
        let state = self.state.as_ref().ok_or_else(not_reset)?;
        Ok(Observation::from_state(state, self.model.limits()))
    }

    /// Starts a new episode on `snapshot`.
    ///
    /// Structural problems in the snapshot are reported together as one
    /// input error. An episode without flights is immediately `Done`.
    pub fn reset(&mut self, snapshot: Snapshot) -> Result<Observation> {
        if let Err(issues) = validate_snapshot(&snapshot) {
            let messages: Vec<String> = issues.into_iter().map(|i| i.message).collect();
            return Err(RecoveryError::input(format!(
                "invalid snapshot: {}",
                messages.join("; ")
            )));
        }

        info!(
            flights = snapshot.flights.len(),
            pilots = snapshot.pilots.len(),
            aircraft = snapshot.aircraft.len(),
            "episode reset"
        );

        let state = EpisodeState::new(snapshot);
        let observation = Observation::from_state(&state, self.model.limits());
        self.state = Some(state);
        Ok(observation)
    }

    /// Applies `action` to the current flight and advances.
    pub fn step(&mut self, action: Action) -> Result<StepResult> {
        let state = self.state.as_mut().ok_or_else(not_reset)?;
        if state.is_done() {
            return Err(RecoveryError::invalid_state(
                "episode is done; call reset to start a new one",
            ));
        }
        let flight = state
            .current_flight()
            .cloned()
            .ok_or_else(|| RecoveryError::invalid_state("no flight at the episode pointer"))?;

        action.check()?;
        let context = step_context(&self.settings, state, &flight, &action)?;
        let scored = self.model.score_action(&action, &context)?;

        // Nothing below can fail: the episode only changes once scoring succeeded.
        if let Some(validation) = &scored.validation {
            if !validation.compliant {
                warn!(
                    flight = %flight.id,
                    reason = %validation.reason,
                    "applying non-compliant crew swap"
                );
            }
        }
        apply_action(state, &flight, &action);
        state.breakdown += &scored.breakdown;
        state.plan.push(PlannedAction::new(flight.id.clone(), action.clone()).with_context(context));
        state.last_validation = scored.validation.clone();
        state.pointer += 1;
        state.steps += 1;

        let termination_reason = if state.pointer >= state.snapshot.flights.len() {
            Some(TerminationReason::AllFlightsProcessed)
        } else if self.settings.max_steps.is_some_and(|max| state.steps >= max) {
            Some(TerminationReason::HorizonReached)
        } else {
            None
        };
        state.phase = if termination_reason.is_some() {
            EpisodePhase::Done
        } else {
            EpisodePhase::Stepping
        };

        if let Some(reason) = termination_reason {
            info!(
                steps = state.steps,
                total_cost = state.breakdown.total_cost,
                violations = state.breakdown.num_violations,
                ?reason,
                "episode finished"
            );
        }

        let observation = Observation::from_state(state, self.model.limits());
        Ok(StepResult {
            observation,
            reward: -scored.breakdown.total_cost,
            done: termination_reason.is_some(),
            info: StepInfo {
                flight_id: flight.id,
                step: state.steps,
                action_kind: action.kind(),
                validation: scored.validation,
                delta: scored.breakdown,
                termination_reason,
            },
        })
    }
}

fn not_reset() -> RecoveryError {
    RecoveryError::invalid_state("environment has not been reset")
}

/// Derives the scoring context of `action` on `flight`, checking that its
/// target exists and that the action leaves the flight in range.
fn step_context(
    settings: &EnvironmentSettings,
    state: &EpisodeState,
    flight: &Flight,
    action: &Action,
) -> Result<ActionContext> {
    let kind = action.kind();
    let mut context = ActionContext::none()
        .with_passengers(f64::from(flight.passengers) * settings.impact.passenger_share(kind))
        .with_inefficiency(settings.impact.inefficiency_units(kind));

    match action {
        Action::SwapAircraft { target } => {
            if state.snapshot.aircraft_by_id(target).is_none() {
                return Err(RecoveryError::input(format!("unknown aircraft '{target}'")));
            }
        }
        Action::SwapCrew { target_pilot } => {
            let pilot = state
                .snapshot
                .pilot(target_pilot)
                .ok_or_else(|| RecoveryError::input(format!("unknown pilot '{target_pilot}'")))?;
            context.crew = Some(CrewAssignment::new(pilot.clone(), flight.as_proposed()?));
        }
        Action::Consolidate { with_flight } => {
            if *with_flight == flight.id {
                return Err(RecoveryError::input(format!(
                    "flight '{with_flight}' cannot be consolidated into itself"
                )));
            }
            let idx = state
                .snapshot
                .flight_index(with_flight)
                .ok_or_else(|| RecoveryError::input(format!("unknown flight '{with_flight}'")))?;
            if idx < state.pointer {
                return Err(RecoveryError::input(format!(
                    "flight '{with_flight}' was already processed"
                )));
            }
            if !state.snapshot.flights[idx].is_operating() {
                return Err(RecoveryError::input(format!(
                    "flight '{with_flight}' is not operating"
                )));
            }
        }
        Action::Delay { minutes } => {
            flight.delayed_departure(*minutes)?;
        }
        Action::NoAction | Action::Cancel | Action::Reroute { .. } => {}
    }
    Ok(context)
}

/// Writes `action` into the episode's snapshot copy.
fn apply_action(state: &mut EpisodeState, flight: &Flight, action: &Action) {
    let snapshot = &mut state.snapshot;
    let idx = state.pointer;

    match action {
        Action::NoAction => {}
        Action::Delay { minutes } => {
            let current = &mut snapshot.flights[idx];
            current.delay_minutes += minutes;
            // Range-checked in `step_context`.
            if let Ok(departure) = flight.delayed_departure(*minutes) {
                current.departure_time = departure;
            }
        }
        Action::Cancel => snapshot.flights[idx].status = FlightStatus::Cancelled,
        Action::SwapAircraft { target } => snapshot.flights[idx].aircraft_id = target.clone(),
        Action::SwapCrew { target_pilot } => {
            if let Some(pilot) = snapshot.pilots.iter_mut().find(|p| p.id == *target_pilot) {
                pilot.record_flight(flight.duration_hours, flight.is_night_duty);
            }
            snapshot.flights[idx].pilot_id = target_pilot.clone();
        }
        Action::Reroute { new_route } => snapshot.flights[idx].route = new_route.clone(),
        Action::Consolidate { with_flight } => {
            if let Some(target) = snapshot.flights.iter_mut().find(|f| f.id == *with_flight) {
                target.passengers = target.passengers.saturating_add(flight.passengers);
            }
            snapshot.flights[idx].status = FlightStatus::Consolidated {
                into: with_flight.clone(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostWeights;
    use crate::models::{Aircraft, PilotState};

    fn snapshot() -> Snapshot {
        Snapshot::new()
            .with_pilot(PilotState::new("VERMA").with_daily_hours(7.0))
            .with_pilot(PilotState::new("KUMAR").with_daily_hours(4.0))
            .with_aircraft(Aircraft::new("VT-IFA"))
            .with_aircraft(Aircraft::new("VT-IFB"))
            .with_flight(Flight::new("6E-101", "VERMA", "VT-IFA", 2.0).with_passengers(100))
            .with_flight(Flight::new("6E-102", "KUMAR", "VT-IFB", 1.5).with_passengers(50))
            .with_flight(Flight::new("6E-103", "KUMAR", "VT-IFB", 1.0).with_passengers(20))
    }

    fn env() -> RecoveryEnvironment {
        RecoveryEnvironment::new(RecoveryConfig::default()).unwrap()
    }

    #[test]
    fn test_step_before_reset() {
        let mut env = env();
        let err = env.step(Action::NoAction).unwrap_err();
        assert!(matches!(err, RecoveryError::InvalidState(_)));
        assert!(env.observation().is_err());
        assert!(env.episode_plan().is_empty());
    }

    #[test]
    fn test_reset_observation() {
        let mut env = env();
        let obs = env.reset(snapshot()).unwrap();
        assert_eq!(obs.remaining_flights(), 3);
        assert_eq!(env.phase(), Some(EpisodePhase::Ready));
        assert_eq!(env.breakdown(), Some(&PlanCostBreakdown::zero()));
    }

    #[test]
    fn test_full_episode() {
        let mut env = env();
        env.reset(snapshot()).unwrap();

        // Delay: 30 min + 100 passengers * 10.
        let r1 = env.step(Action::delay(30.0)).unwrap();
        assert!((r1.reward + 1030.0).abs() < 1e-9);
        assert!(!r1.done);
        assert_eq!(env.phase(), Some(EpisodePhase::Stepping));

        // Compliant swap, no passenger share by default.
        let r2 = env.step(Action::swap_crew("KUMAR")).unwrap();
        assert!(r2.info.validation.as_ref().unwrap().compliant);
        assert!((r2.reward - 0.0).abs() < 1e-9);

        let r3 = env.step(Action::Cancel).unwrap();
        assert!(r3.done);
        assert_eq!(
            r3.info.termination_reason,
            Some(TerminationReason::AllFlightsProcessed)
        );
        assert_eq!(env.phase(), Some(EpisodePhase::Done));

        let b = env.breakdown().unwrap();
        assert_eq!(b.num_cancellations, 1);
        assert!((b.total_delay_minutes - 30.0).abs() < 1e-9);
        let total_reward = r1.reward + r2.reward + r3.reward;
        assert_eq!(total_reward, -b.total_cost);

        let err = env.step(Action::NoAction).unwrap_err();
        assert!(matches!(err, RecoveryError::InvalidState(_)));
    }

    #[test]
    fn test_non_compliant_swap_is_applied_and_penalised() {
        let mut env = env();
        let mut snap = snapshot();
        snap.flights[0].pilot_id = "KUMAR".into();
        env.reset(snap).unwrap();

        let r = env.step(Action::swap_crew("VERMA")).unwrap();
        let validation = r.info.validation.unwrap();
        assert!(!validation.compliant);
        assert_eq!(validation.reason, "Exceeds max daily flight time of 8.0 hours.");
        assert_eq!(r.info.delta.num_violations, 1);
        assert!((r.reward + 1000.0).abs() < 1e-9);

        let state = env.state().unwrap();
        assert_eq!(state.snapshot.flights[0].pilot_id, "VERMA");
        let verma = state.snapshot.pilot("VERMA").unwrap();
        assert!((verma.daily_flight_hours - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_target_does_not_advance() {
        let mut env = env();
        env.reset(snapshot()).unwrap();

        assert!(env.step(Action::swap_crew("NOBODY")).unwrap_err().is_input());
        assert!(env.step(Action::swap_aircraft("VT-XXX")).unwrap_err().is_input());
        assert!(env.step(Action::consolidate("6E-101")).unwrap_err().is_input());
        assert!(env.step(Action::delay(-5.0)).unwrap_err().is_input());

        let state = env.state().unwrap();
        assert_eq!(state.pointer, 0);
        assert_eq!(state.phase, EpisodePhase::Ready);
        assert!(state.plan.is_empty());
    }

    #[test]
    fn test_consolidation_target_must_be_ahead_and_operating() {
        let mut env = env();
        let mut snap = snapshot().with_flight(Flight::new("6E-104", "KUMAR", "VT-IFB", 1.0));
        snap.flights[3].status = FlightStatus::Cancelled;
        env.reset(snap).unwrap();

        env.step(Action::Cancel).unwrap();
        // 6E-101 is behind the pointer and cancelled.
        let err = env.step(Action::consolidate("6E-101")).unwrap_err();
        assert!(err.is_input());
        assert!(err.to_string().contains("already processed"));

        let err = env.step(Action::consolidate("6E-104")).unwrap_err();
        assert!(err.is_input());
        assert!(err.to_string().contains("not operating"));

        let state = env.state().unwrap();
        assert_eq!(state.pointer, 1);
        assert_eq!(state.snapshot.flights[0].passengers, 100);
        assert_eq!(state.plan.len(), 1);

        env.step(Action::consolidate("6E-103")).unwrap();
        // 6E-102 is consolidated and behind the pointer.
        assert!(env.step(Action::consolidate("6E-102")).unwrap_err().is_input());
    }

    #[test]
    fn test_delay_out_of_time_range() {
        let mut env = env();
        let mut snap = snapshot();
        snap.flights[0].departure_time = Some(1_700_000_000_000);
        env.reset(snap).unwrap();

        let err = env.step(Action::delay(1e300)).unwrap_err();
        assert!(err.is_input());
        let state = env.state().unwrap();
        assert_eq!(state.pointer, 0);
        assert_eq!(state.snapshot.flights[0].departure_time, Some(1_700_000_000_000));
        assert!((state.snapshot.flights[0].delay_minutes - 0.0).abs() < 1e-10);
        assert_eq!(env.breakdown(), Some(&PlanCostBreakdown::zero()));

        env.step(Action::delay(30.0)).unwrap();
        let state = env.state().unwrap();
        assert_eq!(state.snapshot.flights[0].departure_time, Some(1_700_001_800_000));
    }

    #[test]
    fn test_arrival_out_of_time_range_rejected_on_reset() {
        let mut env = env();
        let snap = snapshot().with_flight(
            Flight::new("6E-104", "KUMAR", "VT-IFB", 1e300).with_departure(1_700_000_000_000),
        );
        let err = env.reset(snap).unwrap_err();
        assert!(err.is_input());
        assert!(err.to_string().contains("6E-104"));
        assert!(env.state().is_none());
    }

    #[test]
    fn test_horizon() {
        let config = RecoveryConfig {
            environment: EnvironmentSettings::default().with_max_steps(2),
            ..RecoveryConfig::default()
        };
        let mut env = RecoveryEnvironment::new(config).unwrap();
        env.reset(snapshot()).unwrap();

        assert!(!env.step(Action::NoAction).unwrap().done);
        let last = env.step(Action::NoAction).unwrap();
        assert!(last.done);
        assert_eq!(
            last.info.termination_reason,
            Some(TerminationReason::HorizonReached)
        );
        assert_eq!(last.observation.remaining_flights(), 1);
    }

    #[test]
    fn test_empty_snapshot_is_done() {
        let mut env = env();
        let obs = env.reset(Snapshot::new()).unwrap();
        assert_eq!(obs.remaining_flights(), 0);
        assert_eq!(env.phase(), Some(EpisodePhase::Done));
        assert!(matches!(
            env.step(Action::NoAction).unwrap_err(),
            RecoveryError::InvalidState(_)
        ));
    }

    #[test]
    fn test_invalid_snapshot_rejected() {
        let mut env = env();
        let snap = snapshot().with_flight(Flight::new("6E-104", "GHOST", "VT-IFA", 1.0));
        let err = env.reset(snap).unwrap_err();
        assert!(err.is_input());
        assert!(err.to_string().contains("GHOST"));
        assert!(env.state().is_none());
    }

    #[test]
    fn test_resource_actions_update_snapshot() {
        let config = RecoveryConfig {
            cost_weights: CostWeights::default(),
            environment: EnvironmentSettings::default().with_impact(ImpactProfile::none()),
            ..RecoveryConfig::default()
        };
        let mut env = RecoveryEnvironment::new(config).unwrap();
        env.reset(snapshot()).unwrap();

        env.step(Action::swap_aircraft("VT-IFB")).unwrap();
        env.step(Action::consolidate("6E-103")).unwrap();
        let r = env.step(Action::reroute("DEL-JAI-BOM")).unwrap();
        assert!(r.done);

        let state = env.state().unwrap();
        assert_eq!(state.snapshot.flights[0].aircraft_id, "VT-IFB");
        assert_eq!(
            state.snapshot.flights[1].status,
            FlightStatus::Consolidated {
                into: "6E-103".into()
            }
        );
        assert_eq!(state.snapshot.flights[2].route, "DEL-JAI-BOM");
        assert_eq!(state.snapshot.flights[2].passengers, 70);
        // Three resource actions, zero impact profile.
        assert!((state.breakdown.resource_inefficiency - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_episode_plan_rescoring() {
        let mut env = env();
        env.reset(snapshot()).unwrap();
        env.step(Action::swap_crew("VERMA")).unwrap();
        env.step(Action::delay(45.0)).unwrap();
        env.step(Action::swap_aircraft("VT-IFA")).unwrap();

        let rescored = env.cost_model().score_plan(env.episode_plan()).unwrap();
        assert_eq!(&rescored, env.breakdown().unwrap());
    }
}
