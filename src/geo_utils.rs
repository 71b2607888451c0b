//! # Geographic Utilities
//!
//! Geodesic primitives used by redistribution, orientation detection and alignment.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two GPS points |
//! | [`distance`] | Great-circle distance, optionally corrected for elevation change |
//! | [`bearing`] | Initial compass bearing from one point to another |
//! | [`move_point`] | Translate a point by a distance along a bearing |
//! | [`polyline_length`] | Total length of a GPS track in meters |
//!
//! ## Example
//!
//! ```rust
//! use track_aligner::{GpsPoint, geo_utils};
//!
//! let start = GpsPoint::new(51.5074, -0.1278);
//! let end = GpsPoint::new(51.5090, -0.1300);
//!
//! let heading = geo_utils::bearing(&start, &end);
//! let meters = geo_utils::haversine_distance(&start, &end);
//!
//! // Walking the same distance along the same heading lands on `end`
//! let moved = geo_utils::move_point(&start, meters, heading);
//! assert!(geo_utils::haversine_distance(&moved, &end) < 0.01);
//! ```
//!
//! ## Algorithm Notes
//!
//! All three primitives use the spherical model behind [`geo::Haversine`] (mean Earth
//! radius 6,371,008.8 m). Distances, bearings and translations therefore agree with each
//! other, which the alignment cost function relies on when it compares redistributed
//! points against raw ones.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)

use geo::{Bearing, Destination, Distance, Haversine, Point};

use crate::GpsPoint;

#[inline]
fn to_point(p: &GpsPoint) -> Point<f64> {
    Point::new(p.longitude, p.latitude)
}

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two GPS points using the Haversine formula.
///
/// Elevation is ignored. Returns meters along the Earth's surface.
///
/// # Example
///
/// ```rust
/// use track_aligner::{GpsPoint, geo_utils};
///
/// let london = GpsPoint::new(51.5074, -0.1278);
/// let paris = GpsPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 1000.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    Haversine::distance(to_point(p1), to_point(p2))
}

/// Distance in meters between two points, optionally folding in elevation.
///
/// With `use_elevation` set and both points carrying an elevation, the result is
/// `sqrt(horizontal² + Δelevation²)`. Otherwise it is the plain haversine distance.
///
/// The result is symmetric and zero for a point compared with itself.
///
/// # Example
///
/// ```rust
/// use track_aligner::{GpsPoint, geo_utils};
///
/// let low = GpsPoint::with_elevation(46.0, 7.0, 1000.0);
/// let high = GpsPoint::with_elevation(46.0, 7.0, 1300.0);
///
/// assert_eq!(geo_utils::distance(&low, &high, false), 0.0);
/// assert!((geo_utils::distance(&low, &high, true) - 300.0).abs() < 1e-9);
/// ```
pub fn distance(p1: &GpsPoint, p2: &GpsPoint, use_elevation: bool) -> f64 {
    let horizontal = haversine_distance(p1, p2);
    if !use_elevation {
        return horizontal;
    }
    match (p1.elevation, p2.elevation) {
        (Some(e1), Some(e2)) => horizontal.hypot(e1 - e2),
        _ => horizontal,
    }
}

/// Calculate the total length of a polyline (GPS track) in meters.
///
/// Sums the haversine distance between consecutive points. Empty or single-point
/// tracks return 0.0.
pub fn polyline_length(points: &[GpsPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Direction Functions
// =============================================================================

/// Initial great-circle bearing from `p1` to `p2` in degrees, normalized to `[0, 360)`.
///
/// North is 0°, east is 90°. The value is meaningless when both points coincide;
/// callers must not ask for the bearing of a zero-length segment.
///
/// # Example
///
/// ```rust
/// use track_aligner::{GpsPoint, geo_utils};
///
/// let origin = GpsPoint::new(0.0, 0.0);
/// let east = GpsPoint::new(0.0, 1.0);
/// assert!((geo_utils::bearing(&origin, &east) - 90.0).abs() < 1e-9);
/// ```
pub fn bearing(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    Haversine::bearing(to_point(p1), to_point(p2)).rem_euclid(360.0)
}

/// Translate `point` by `meters` along `bearing_deg`.
///
/// A negative distance moves backwards along the same heading. Only latitude and
/// longitude change; the elevation of `point` is carried over unchanged.
pub fn move_point(point: &GpsPoint, meters: f64, bearing_deg: f64) -> GpsPoint {
    let moved = Haversine::destination(to_point(point), bearing_deg, meters);
    GpsPoint {
        latitude: moved.y(),
        longitude: moved.x(),
        elevation: point.elevation,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
