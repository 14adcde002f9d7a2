//! Geographic value objects
//!
//! The engine treats geometry as plain coordinate data: a claim carries a
//! center coordinate and an optional boundary polygon, and the only
//! geometric rule it enforces is containment within a configured national
//! bounding box. Anything heavier (overlap detection, boundary extraction)
//! belongs to the external GIS service.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors for geographic value objects
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("Latitude {0} is outside the valid range (-90 to 90)")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside the valid range (-180 to 180)")]
    InvalidLongitude(f64),
}

/// A WGS84 point coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside the WGS84 ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// An axis-aligned bounding box used for national-boundary checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Mainland India bounding box (6-37 degrees N, 68-97 degrees E)
pub const INDIA_BOUNDS: BoundingBox = BoundingBox {
    min_latitude: 6.0,
    max_latitude: 37.0,
    min_longitude: 68.0,
    max_longitude: 97.0,
};

impl BoundingBox {
    /// Checks whether the latitude falls inside the box
    pub fn contains_latitude(&self, latitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
    }

    /// Checks whether the longitude falls inside the box
    pub fn contains_longitude(&self, longitude: f64) -> bool {
        (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// Checks whether the coordinate falls inside the box
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.contains_latitude(coordinate.latitude)
            && self.contains_longitude(coordinate.longitude)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        INDIA_BOUNDS
    }
}
