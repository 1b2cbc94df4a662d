//! Core data models for flight conflict graphs.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// A point on the projected plane (kilometres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance on the projected plane.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An airport with its geographic and projected position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    /// Decimal degrees, positive north
    pub latitude: f64,
    /// Decimal degrees, positive east
    pub longitude: f64,
    pub position: Point,
}

impl Airport {
    /// Create an airport from decimal coordinates, projecting it onto the plane.
    pub fn from_geo(
        code: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            latitude,
            longitude,
            position: crate::geo::geo_to_planar(latitude, longitude),
        }
    }

    /// Fixture airport at an already projected position. Latitude and
    /// longitude are left at zero.
    #[cfg(test)]
    pub(crate) fn at(code: impl Into<String>, name: impl Into<String>, position: Point) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            latitude: 0.0,
            longitude: 0.0,
            position,
        }
    }
}

/// A scheduled flight between two airports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveTime,
    #[serde(with = "duration_minutes")]
    pub duration: Duration,
}

impl Flight {
    pub fn new(
        id: impl Into<String>,
        departure_airport: impl Into<String>,
        arrival_airport: impl Into<String>,
        departure_time: NaiveTime,
        duration: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            departure_airport: departure_airport.into(),
            arrival_airport: arrival_airport.into(),
            departure_time,
            duration,
        }
    }
}

mod duration_minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        i64::deserialize(deserializer).map(Duration::minutes)
    }
}
