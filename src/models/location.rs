// Location model representing coordinates in 2D space

use geo::{Coord, EuclideanDistance, Point};
use serde::{Deserialize, Serialize};

/// Represents a location with (x, y) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// Creates a new location with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance between two locations
    pub fn distance_to(&self, other: &Location) -> f64 {
        Point::from(*self).euclidean_distance(&Point::from(*other))
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Vector from `origin` to this location
    pub fn relative_to(&self, origin: &Location) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Point::new(location.x, location.y)
    }
}

impl From<Location> for Coord<f64> {
    fn from(location: Location) -> Self {
        Coord {
            x: location.x,
            y: location.y,
        }
    }
}
