//! Recovery actions and their scoring context.
//!
//! An [`Action`] applies to exactly one flight at one step. The cost of an
//! action depends on caller-supplied impact data ([`ActionContext`]): how
//! many passengers it touches, how much resource churn it causes, and, for
//! crew swaps, which pilot/sector pair must pass the duty-time rules.

use serde::{Deserialize, Serialize};

use super::{PilotState, ProposedFlight};
use crate::error::{RecoveryError, Result};

/// A recovery action on a single flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Leave the flight as is.
    NoAction,
    /// Push the departure back.
    Delay { minutes: f64 },
    /// Cancel the flight.
    Cancel,
    /// Operate with another aircraft.
    SwapAircraft { target: String },
    /// Operate with another pilot.
    SwapCrew { target_pilot: String },
    /// Fly a different routing.
    Reroute { new_route: String },
    /// Merge passengers into another flight.
    Consolidate { with_flight: String },
}

/// Discriminant of [`Action`], in the stable discrete-action order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    NoAction,
    Delay,
    Cancel,
    SwapAircraft,
    SwapCrew,
    Reroute,
    Consolidate,
}

impl ActionKind {
    /// All kinds, indexed by their discrete action number.
    pub const ALL: [ActionKind; 7] = [
        ActionKind::NoAction,
        ActionKind::Delay,
        ActionKind::Cancel,
        ActionKind::SwapAircraft,
        ActionKind::SwapCrew,
        ActionKind::Reroute,
        ActionKind::Consolidate,
    ];

    /// Kind for a discrete action number.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Discrete action number.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::NoAction => "no_action",
            ActionKind::Delay => "delay",
            ActionKind::Cancel => "cancel",
            ActionKind::SwapAircraft => "swap_aircraft",
            ActionKind::SwapCrew => "swap_crew",
            ActionKind::Reroute => "reroute",
            ActionKind::Consolidate => "consolidate",
        }
    }

    /// Parses a snake_case name.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| RecoveryError::UnsupportedAction(name.to_string()))
    }

    /// Whether the kind consumes spare aircraft, routing, or capacity.
    pub fn uses_resources(self) -> bool {
        matches!(
            self,
            ActionKind::SwapAircraft | ActionKind::Reroute | ActionKind::Consolidate
        )
    }
}

impl Action {
    /// Delay by `minutes`.
    pub fn delay(minutes: f64) -> Self {
        Action::Delay { minutes }
    }

    /// Swap in another aircraft.
    pub fn swap_aircraft(target: impl Into<String>) -> Self {
        Action::SwapAircraft {
            target: target.into(),
        }
    }

    /// Swap in another pilot.
    pub fn swap_crew(target_pilot: impl Into<String>) -> Self {
        Action::SwapCrew {
            target_pilot: target_pilot.into(),
        }
    }

    /// Reroute onto `new_route`.
    pub fn reroute(new_route: impl Into<String>) -> Self {
        Action::Reroute {
            new_route: new_route.into(),
        }
    }

    /// Consolidate into `with_flight`.
    pub fn consolidate(with_flight: impl Into<String>) -> Self {
        Action::Consolidate {
            with_flight: with_flight.into(),
        }
    }

    /// The action's kind.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::NoAction => ActionKind::NoAction,
            Action::Delay { .. } => ActionKind::Delay,
            Action::Cancel => ActionKind::Cancel,
            Action::SwapAircraft { .. } => ActionKind::SwapAircraft,
            Action::SwapCrew { .. } => ActionKind::SwapCrew,
            Action::Reroute { .. } => ActionKind::Reroute,
            Action::Consolidate { .. } => ActionKind::Consolidate,
        }
    }

    /// Rejects negative magnitudes and empty targets.
    pub fn check(&self) -> Result<()> {
        let empty_target = match self {
            Action::Delay { minutes } => {
                if !minutes.is_finite() || *minutes < 0.0 {
                    return Err(RecoveryError::input(format!(
                        "delay minutes must be non-negative, got {minutes}"
                    )));
                }
                false
            }
            Action::SwapAircraft { target } => target.is_empty(),
            Action::SwapCrew { target_pilot } => target_pilot.is_empty(),
            Action::Reroute { new_route } => new_route.is_empty(),
            Action::Consolidate { with_flight } => with_flight.is_empty(),
            Action::NoAction | Action::Cancel => false,
        };
        if empty_target {
            return Err(RecoveryError::input(format!(
                "{} action needs a target",
                self.kind().name()
            )));
        }
        Ok(())
    }
}

/// Caller-supplied impact magnitudes for one action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionImpact {
    /// Passengers affected by the action.
    #[serde(default)]
    pub affected_passengers: f64,
    /// Resource inefficiency units (only counted for resource actions).
    #[serde(default)]
    pub inefficiency_units: f64,
}

impl ActionImpact {
    /// Creates an impact record.
    pub fn new(affected_passengers: f64, inefficiency_units: f64) -> Self {
        Self {
            affected_passengers,
            inefficiency_units,
        }
    }

    /// Rejects negative or non-finite magnitudes.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("affected_passengers", self.affected_passengers),
            ("inefficiency_units", self.inefficiency_units),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RecoveryError::input(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// The pilot/sector pair a crew swap would create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewAssignment {
    /// The incoming pilot's state.
    #[serde(alias = "pilot_state")]
    pub pilot: PilotState,
    /// The sector they would fly.
    #[serde(alias = "proposed_flight")]
    pub flight: ProposedFlight,
}

impl CrewAssignment {
    /// Creates a crew assignment.
    pub fn new(pilot: PilotState, flight: ProposedFlight) -> Self {
        Self { pilot, flight }
    }
}

/// Scoring context of one action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionContext {
    /// Impact magnitudes.
    #[serde(default)]
    pub impact: ActionImpact,
    /// Required for crew swaps.
    #[serde(default)]
    pub crew: Option<CrewAssignment>,
}

impl ActionContext {
    /// Context with no passenger or resource impact.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the affected passenger count.
    pub fn with_passengers(mut self, passengers: f64) -> Self {
        self.impact.affected_passengers = passengers;
        self
    }

    /// Sets the resource inefficiency units.
    pub fn with_inefficiency(mut self, units: f64) -> Self {
        self.impact.inefficiency_units = units;
        self
    }

    /// Attaches the crew assignment to validate.
    pub fn with_crew(mut self, pilot: PilotState, flight: ProposedFlight) -> Self {
        self.crew = Some(CrewAssignment::new(pilot, flight));
        self
    }
}

/// An action bound to its flight and scoring context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedAction {
    /// Flight the action applies to.
    pub flight_id: String,
    /// The action.
    pub action: Action,
    /// Scoring context.
    #[serde(default)]
    pub context: ActionContext,
}

impl PlannedAction {
    /// Creates a planned action with an empty context.
    pub fn new(flight_id: impl Into<String>, action: Action) -> Self {
        Self {
            flight_id: flight_id.into(),
            action,
            context: ActionContext::none(),
        }
    }

    /// Sets the scoring context.
    pub fn with_context(mut self, context: ActionContext) -> Self {
        self.context = context;
        self
    }
}
