use serde::{Deserialize, Serialize};
use std::fmt;

/// Miles per degree of latitude at the equator
pub const EQUATOR_LAT_DEGREE_IN_MILES: f64 = 69.172;

/// A WGS84 point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both halves are finite numbers; NaN and infinities cannot go on the wire
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Renders as `"{lat},{lon}"`, the form used by `latlng` and `bounds`.
/// Values are plain decimals (`1e21` prints all its digits); range is not checked.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Rectangle in degrees. No ordering between the edges is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    pub fn southwest(&self) -> Coordinates {
        Coordinates::new(self.south, self.west)
    }

    pub fn northeast(&self) -> Coordinates {
        Coordinates::new(self.north, self.east)
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }
}

/// Calculate a bounding box around a center point
///
/// The latitude span is `miles / 69.172` degrees. The longitude span is
/// corrected for meridian convergence using the cosine of the box's
/// *southern* edge, not the center. Nothing is clamped: boxes near the
/// poles or across the antimeridian come back as computed.
///
/// # Arguments
/// * `latitude`, `longitude` - Center in degrees
/// * `mile_radius` - Half-width of the box in miles
pub fn bounding_box(latitude: f64, longitude: f64, mile_radius: f64) -> BoundingBox {
    let north = latitude + mile_radius / EQUATOR_LAT_DEGREE_IN_MILES;
    let south = latitude - (north - latitude);

    let east =
        longitude + mile_radius / (south.to_radians().cos() * EQUATOR_LAT_DEGREE_IN_MILES);
    let west = longitude - (east - longitude);

    BoundingBox {
        south,
        west,
        north,
        east,
    }
}
