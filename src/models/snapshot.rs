//! Operational snapshot.
//!
//! A consistent, point-in-time read of pilots, aircraft, and the flights
//! requiring disposition. The environment copies it at reset and never
//! writes back.

use serde::{Deserialize, Serialize};

use super::{Aircraft, Flight, PilotState};

/// World-model snapshot fed into an episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Pilots on the roster.
    #[serde(default)]
    pub pilots: Vec<PilotState>,
    /// Available aircraft.
    #[serde(default)]
    pub aircraft: Vec<Aircraft>,
    /// Flights to dispose of, in processing order.
    #[serde(default)]
    pub flights: Vec<Flight>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pilot.
    pub fn with_pilot(mut self, pilot: PilotState) -> Self {
        self.pilots.push(pilot);
        self
    }

    /// Adds an aircraft.
    pub fn with_aircraft(mut self, aircraft: Aircraft) -> Self {
        self.aircraft.push(aircraft);
        self
    }

    /// Adds a flight.
    pub fn with_flight(mut self, flight: Flight) -> Self {
        self.flights.push(flight);
        self
    }

    /// Looks up a pilot by ID.
    pub fn pilot(&self, id: &str) -> Option<&PilotState> {
        self.pilots.iter().find(|p| p.id == id)
    }

    /// Looks up an aircraft by tail number.
    pub fn aircraft_by_id(&self, id: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.id == id)
    }

    /// Index of a flight by ID.
    pub fn flight_index(&self, id: &str) -> Option<usize> {
        self.flights.iter().position(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        let snap = Snapshot::new()
            .with_pilot(PilotState::new("PLT001"))
            .with_aircraft(Aircraft::new("VT-IFA"))
            .with_flight(Flight::new("6E-101", "PLT001", "VT-IFA", 2.0))
            .with_flight(Flight::new("6E-102", "PLT001", "VT-IFA", 1.5));

        assert!(snap.pilot("PLT001").is_some());
        assert!(snap.pilot("PLT999").is_none());
        assert!(snap.aircraft_by_id("VT-IFA").is_some());
        assert_eq!(snap.flight_index("6E-102"), Some(1));
        assert_eq!(snap.flight_index("nope"), None);
    }
}
