//! Per-episode mutable state.

use serde::{Deserialize, Serialize};

use crate::cost::PlanCostBreakdown;
use crate::models::{Flight, PlannedAction, Snapshot};
use crate::rules::ValidationResult;

/// Lifecycle of one episode.
///
/// ```text
/// reset ──► Ready ──step──► Stepping ──step──► … ──► Done
///             └───────────── step (last flight) ─────┘
/// ```
///
/// There are no transitions out of `Done` other than a new `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodePhase {
    /// Reset, no step taken yet.
    Ready,
    /// At least one flight processed, more remain.
    Stepping,
    /// All flights processed or the horizon reached.
    Done,
}

/// Working copy of the snapshot plus the running score.
///
/// Owned by a single environment; never shared between episodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeState {
    /// Snapshot copy, updated as actions are applied.
    pub snapshot: Snapshot,
    /// Index of the next flight to dispose of.
    pub pointer: usize,
    /// Steps taken.
    pub steps: usize,
    /// Running cost breakdown.
    pub breakdown: PlanCostBreakdown,
    /// Applied actions with the context they were scored in.
    pub plan: Vec<PlannedAction>,
    /// Crew check from the latest `SwapCrew`.
    pub last_validation: Option<ValidationResult>,
    pub phase: EpisodePhase,
}

impl EpisodeState {
    pub(crate) fn new(snapshot: Snapshot) -> Self {
        let phase = if snapshot.flights.is_empty() {
            EpisodePhase::Done
        } else {
            EpisodePhase::Ready
        };
        Self {
            snapshot,
            pointer: 0,
            steps: 0,
            breakdown: PlanCostBreakdown::zero(),
            plan: Vec::new(),
            last_validation: None,
            phase,
        }
    }

    /// The flight the next step applies to.
    pub fn current_flight(&self) -> Option<&Flight> {
        if self.phase == EpisodePhase::Done {
            return None;
        }
        self.snapshot.flights.get(self.pointer)
    }

    /// Flights not yet processed.
    pub fn remaining_flights(&self) -> usize {
        self.snapshot.flights.len().saturating_sub(self.pointer)
    }

    pub fn is_done(&self) -> bool {
        self.phase == EpisodePhase::Done
    }
}
