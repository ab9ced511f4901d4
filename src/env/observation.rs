//! Versioned observation vector.
//!
//! A fixed-shape numeric summary of operational health after each step.
//! Feature order is stable within one [`OBS_VERSION`]; bump the version
//! whenever a feature is added, removed or redefined.
//!
//! | Index | Feature |
//! |-------|---------|
//! | 0 | Average delay minutes per processed flight |
//! | 1 | Cancellations so far |
//! | 2 | Duty-time violations so far |
//! | 3 | Flights still awaiting disposition |
//! | 4 | Resource inefficiency units so far |
//! | 5 | Affected passengers so far |
//! | 6 | Episode progress, 0..1 |
//! | 7 | Cumulative total cost |
//! | 8 | Mean pilot daily flight-time utilisation |
//! | 9 | Mean aircraft health (1.0 with no aircraft) |

use serde::{Deserialize, Serialize};

use super::EpisodeState;
use crate::rules::RuleLimits;

/// Current observation schema version.
pub const OBS_VERSION: u32 = 1;

/// Number of features in an observation.
pub const OBS_DIM: usize = 10;

pub const AVG_DELAY: usize = 0;
pub const CANCELLATIONS: usize = 1;
pub const VIOLATIONS: usize = 2;
pub const REMAINING_FLIGHTS: usize = 3;
pub const RESOURCE_INEFFICIENCY: usize = 4;
pub const PASSENGER_IMPACT: usize = 5;
pub const PROGRESS: usize = 6;
pub const TOTAL_COST: usize = 7;
pub const PILOT_UTILISATION: usize = 8;
pub const AIRCRAFT_HEALTH: usize = 9;

/// Observation handed to a policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Schema version.
    pub obs_version: u32,
    /// Feature vector, see the module table.
    pub features: [f32; OBS_DIM],
}

impl Observation {
    /// Builds the observation for an episode under `limits`.
    pub fn from_state(state: &EpisodeState, limits: &RuleLimits) -> Self {
        let snapshot = &state.snapshot;
        let breakdown = &state.breakdown;
        let processed = state.pointer;
        let total = snapshot.flights.len();

        let avg_delay = if processed == 0 {
            0.0
        } else {
            breakdown.total_delay_minutes / processed as f64
        };
        let progress = if total == 0 {
            1.0
        } else {
            processed as f64 / total as f64
        };
        let utilisation = mean(
            snapshot
                .pilots
                .iter()
                .map(|p| p.daily_flight_hours / limits.max_daily_flight_time),
        )
        .unwrap_or(0.0);
        let health = mean(snapshot.aircraft.iter().map(|a| a.health_score)).unwrap_or(1.0);

        let mut features = [0.0f32; OBS_DIM];
        features[AVG_DELAY] = avg_delay as f32;
        features[CANCELLATIONS] = breakdown.num_cancellations as f32;
        features[VIOLATIONS] = breakdown.num_violations as f32;
        features[REMAINING_FLIGHTS] = total.saturating_sub(processed) as f32;
        features[RESOURCE_INEFFICIENCY] = breakdown.resource_inefficiency as f32;
        features[PASSENGER_IMPACT] = breakdown.passenger_impact as f32;
        features[PROGRESS] = progress as f32;
        features[TOTAL_COST] = breakdown.total_cost as f32;
        features[PILOT_UTILISATION] = utilisation as f32;
        features[AIRCRAFT_HEALTH] = health as f32;

        Self {
            obs_version: OBS_VERSION,
            features,
        }
    }

    /// Feature at `index`.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.features.get(index).copied()
    }

    /// Remaining flights as a count.
    pub fn remaining_flights(&self) -> usize {
        self.features[REMAINING_FLIGHTS] as usize
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
