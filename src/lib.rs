//! Disruption recovery core for crew and flight schedules.
//!
//! An external proposer suggests recovery actions (delay, cancel, swap crew
//! or aircraft, reroute, consolidate). This crate decides whether a crew
//! assignment respects flight and duty time limits, scores the business
//! cost of a multi-action plan, and runs a step-wise environment in which
//! such plans can be tried and measured.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `PilotState`, `ProposedFlight`, `Flight`,
//!   `Aircraft`, `Snapshot`, `Action`, `PlannedAction`
//! - **`rules`**: Ordered duty-time rule engine (`RuleEngine`, `RuleLimits`)
//! - **`cost`**: Plan scoring (`CostModel`, `CostWeights`, `PlanCostBreakdown`)
//! - **`env`**: Recovery environment with reset/step episodes
//! - **`policy`**: Baseline policies and rollouts
//! - **`validation`**: Snapshot integrity checks (duplicate IDs, dangling refs)
//! - **`contract`**: JSON request/response records for external callers
//! - **`config`**: TOML configuration
//!
//! # Determinism
//!
//! The rule engine and the cost model are pure functions of their explicit
//! arguments. Limits and weights are immutable values handed to
//! constructors; nothing is read from global state. Summing the rewards of
//! an environment episode reproduces `-total_cost` of batch-scoring the same
//! actions exactly.
//!
//! # Example
//!
//! ```
//! use u_recovery::models::{PilotState, ProposedFlight};
//! use u_recovery::rules::{validate_assignment, RuleLimits};
//!
//! let verma = PilotState::new("PLT_VERMA").with_daily_hours(7.0);
//! let result = validate_assignment(&verma, &ProposedFlight::new(2.0), &RuleLimits::default()).unwrap();
//! assert_eq!(result.as_tuple(), (false, "Exceeds max daily flight time of 8.0 hours."));
//! ```

pub mod config;
pub mod contract;
pub mod cost;
pub mod env;
pub mod error;
pub mod logging;
pub mod models;
pub mod policy;
pub mod rules;
pub mod validation;

pub use error::{RecoveryError, Result};
