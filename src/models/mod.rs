//! Recovery domain models.
//!
//! Provides the data types exchanged between the snapshot provider, the
//! rule engine, the cost model, and the recovery environment.
//!
//! # Domain Mappings
//!
//! | u-recovery | Airline operations | Regulation |
//! |------------|-------------------|------------|
//! | PilotState | Crew member duty record | FDTL accumulators |
//! | ProposedFlight | Sector to be assigned | Flight duty |
//! | Flight | Scheduled flight leg | - |
//! | Action | Recovery decision | - |
//! | Snapshot | World-model read | - |

mod action;
mod flight;
mod pilot;
mod snapshot;

pub use action::{
    Action, ActionContext, ActionImpact, ActionKind, CrewAssignment, PlannedAction,
};
pub use flight::{Aircraft, Flight, FlightStatus, ProposedFlight};
pub use pilot::PilotState;
pub use snapshot::Snapshot;
