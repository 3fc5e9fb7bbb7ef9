//! Team (participant) model.
//!
//! Teams are immutable reference data for a scheduling run: identity,
//! home venue, and optional geography consumed by travel scoring.

use serde::{Deserialize, Serialize};

/// Miles per degree of latitude/longitude in the planar approximation.
const MILES_PER_DEGREE: f64 = 69.0;

/// A geographic point as decimal-degree latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar distance to another point in miles: `69·√(Δlat² + Δlng²)`.
    ///
    /// A flat-earth approximation, not great-circle arithmetic; suitable
    /// only for ranking schedules against each other.
    pub fn distance_miles(&self, other: &Coordinates) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        MILES_PER_DEGREE * (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// A competing team.
///
/// Reference data only: nothing in the pipeline mutates a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Location label (city or campus).
    pub location: String,
    /// Geographic position. `None` disables travel scoring for this team.
    pub coordinates: Option<Coordinates>,
    /// Home venue name, matched against venue conflict constraints.
    pub venue: String,
    /// Conference tag.
    pub conference: Option<String>,
    /// Division tag, used by the divisional pairing format.
    pub division: Option<String>,
}

impl Team {
    /// Creates a new team with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location: String::new(),
            coordinates: None,
            venue: String::new(),
            conference: None,
            division: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the location label.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the geographic coordinates.
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    /// Sets the home venue name.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Sets the conference tag.
    pub fn with_conference(mut self, conference: impl Into<String>) -> Self {
        self.conference = Some(conference.into());
        self
    }

    /// Sets the division tag.
    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }
}
