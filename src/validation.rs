//! Structural validation of operational snapshots.
//!
//! Checks the integrity of a snapshot before an episode starts. Detects:
//! - Duplicate or empty IDs
//! - Flights referencing unknown pilots or aircraft
//! - Negative or non-finite numeric fields
//!
//! All issues are collected, not just the first one, so the snapshot
//! provider can fix them in one pass.

use std::collections::HashSet;

use crate::models::Snapshot;

/// Snapshot validation result.
pub type SnapshotCheck = Result<(), Vec<SnapshotIssue>>;

/// A snapshot integrity issue.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotIssue {
    /// Issue category.
    pub kind: SnapshotIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of snapshot issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotIssueKind {
    /// Two entities share the same ID, or an ID is empty.
    DuplicateId,
    /// A flight references a pilot that is not in the snapshot.
    UnknownPilot,
    /// A flight references an aircraft that is not in the snapshot.
    UnknownAircraft,
    /// A numeric field is negative, non-finite, or out of range.
    InvalidValue,
}

impl SnapshotIssue {
    fn new(kind: SnapshotIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a snapshot.
///
/// Checks:
/// 1. Pilot, aircraft and flight IDs are non-empty and unique per kind
/// 2. Pilot accumulators are non-negative
/// 3. Aircraft health lies in 0.0..=1.0
/// 4. Flight durations are positive and delays non-negative
/// 5. Every flight's pilot and aircraft exist
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(issues)` with all detected issues.
pub fn validate_snapshot(snapshot: &Snapshot) -> SnapshotCheck {
    let mut issues = Vec::new();

    let mut pilot_ids = HashSet::new();
    for pilot in &snapshot.pilots {
        check_id(&mut pilot_ids, &pilot.id, "pilot", &mut issues);
        if let Err(e) = pilot.check() {
            issues.push(SnapshotIssue::new(SnapshotIssueKind::InvalidValue, e.to_string()));
        }
    }

    let mut aircraft_ids = HashSet::new();
    for aircraft in &snapshot.aircraft {
        check_id(&mut aircraft_ids, &aircraft.id, "aircraft", &mut issues);
        if !(0.0..=1.0).contains(&aircraft.health_score) {
            issues.push(SnapshotIssue::new(
                SnapshotIssueKind::InvalidValue,
                format!(
                    "Aircraft '{}' health score {} outside 0..1",
                    aircraft.id, aircraft.health_score
                ),
            ));
        }
    }

    let mut flight_ids = HashSet::new();
    for flight in &snapshot.flights {
        check_id(&mut flight_ids, &flight.id, "flight", &mut issues);

        if let Err(e) = flight.as_proposed().and_then(|p| p.check()) {
            issues.push(SnapshotIssue::new(
                SnapshotIssueKind::InvalidValue,
                format!("Flight '{}': {e}", flight.id),
            ));
        }
        if !flight.delay_minutes.is_finite() || flight.delay_minutes < 0.0 {
            issues.push(SnapshotIssue::new(
                SnapshotIssueKind::InvalidValue,
                format!(
                    "Flight '{}' has negative delay {}",
                    flight.id, flight.delay_minutes
                ),
            ));
        }
        if !pilot_ids.contains(flight.pilot_id.as_str()) {
            issues.push(SnapshotIssue::new(
                SnapshotIssueKind::UnknownPilot,
                format!(
                    "Flight '{}' references unknown pilot '{}'",
                    flight.id, flight.pilot_id
                ),
            ));
        }
        if !aircraft_ids.contains(flight.aircraft_id.as_str()) {
            issues.push(SnapshotIssue::new(
                SnapshotIssueKind::UnknownAircraft,
                format!(
                    "Flight '{}' references unknown aircraft '{}'",
                    flight.id, flight.aircraft_id
                ),
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_id<'a>(
    seen: &mut HashSet<&'a str>,
    id: &'a str,
    entity: &str,
    issues: &mut Vec<SnapshotIssue>,
) {
    if id.is_empty() {
        issues.push(SnapshotIssue::new(
            SnapshotIssueKind::DuplicateId,
            format!("Empty {entity} ID"),
        ));
    } else if !seen.insert(id) {
        issues.push(SnapshotIssue::new(
            SnapshotIssueKind::DuplicateId,
            format!("Duplicate {entity} ID: {id}"),
        ));
    }
}
