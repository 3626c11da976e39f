//! Spatial math for proximity search.
//!
//! Two small, pure pieces: a conservative bounding-box pre-filter computed
//! from a center point and radius, and the exact great-circle distance used
//! to confirm candidates and order results. The bounding box may admit
//! points in its corners beyond the radius; final correctness always rests
//! on the exact distance check downstream.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, the sphere all distance math assumes.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// An axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Check whether a point falls inside the rectangle (inclusive edges).
    pub fn contains(&self, point: &Point) -> bool {
        let (lon, lat) = (point.x(), point.y());
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Width of the rectangle in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// Compute the bounding box enclosing a circle of `radius_km` around
/// `center`.
///
/// The box is a conservative superset of the true circle: its corners lie
/// beyond the radius, so callers must confirm candidates with
/// [`distance_between`]. Assumes a validated center point and radius.
///
/// Known limitation: the longitude delta divides by `cos(latitude)`, so the
/// box grows arbitrarily wide as the center approaches a pole. This is not
/// guarded; high-latitude queries simply pre-filter less effectively.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use georegistry::spatial::bounding_box_around;
///
/// let kathmandu = Point::new(85.3240, 27.7172);
/// let bounds = bounding_box_around(&kathmandu, 5.0);
/// assert!(bounds.contains(&kathmandu));
/// ```
pub fn bounding_box_around(center: &Point, radius_km: f64) -> GeoBounds {
    let lat = center.y();
    let lon = center.x();

    let lat_delta = (radius_km / EARTH_RADIUS_KM).to_degrees();
    let lon_delta = (radius_km / (EARTH_RADIUS_KM * lat.to_radians().cos())).to_degrees();

    GeoBounds {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Exact great-circle distance between two points, in meters.
///
/// Symmetric, zero for identical points, and monotonic in the true surface
/// distance, which makes it usable both as a radius filter and as a sort
/// key.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use georegistry::spatial::distance_between;
///
/// let kathmandu = Point::new(85.3240, 27.7172);
/// let pokhara = Point::new(83.9856, 28.2096);
/// let dist = distance_between(&kathmandu, &pokhara);
/// assert!(dist > 130_000.0 && dist < 150_000.0);
/// ```
pub fn distance_between(a: &Point, b: &Point) -> f64 {
    Haversine.distance(*a, *b)
}
