//! Small circles on the sphere.
//!
//! The ring is built from haversine destination points: one per bearing step
//! around the center, at the great-circle distance matching the angular
//! radius.

use geo::HaversineDestination;
use log::debug;

use crate::error::{Error, Result};
use crate::geom::{MultiPolygon, Point, Polygon, Ring};
use crate::options::MAX_POINTS;

/// Angle between consecutive ring points, in degrees.
pub const CIRCLE_PRECISION: f64 = 6.0;

/// Sphere radius used to turn an angular radius into a haversine distance.
/// Matches the mean earth radius `geo` measures haversine distances with.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// A bearing this close to a full turn closes the ring.
const BEARING_TOLERANCE: f64 = 1e-9;

/// Returns a one-polygon multipolygon approximating the circle of angular
/// `radius` degrees around (`longitude`, `latitude`).
pub fn circle(longitude: f64, latitude: f64, radius: f64) -> Result<MultiPolygon<Point>> {
  circle_with_precision(longitude, latitude, radius, CIRCLE_PRECISION)
}

pub fn circle_with_precision(
  longitude: f64,
  latitude: f64,
  radius: f64,
  precision: f64,
) -> Result<MultiPolygon<Point>> {
  if !radius.is_finite() || radius < 0.0 {
    return Err(Error::InvalidRadius(radius));
  }
  if !precision.is_finite() || precision <= 0.0 {
    return Err(Error::InvalidOptions(format!(
      "circle precision must be a positive number, got {}",
      precision
    )));
  }
  if 360.0 / precision > MAX_POINTS as f64 {
    return Err(Error::InvalidOptions(format!(
      "circle precision {} would trace more than {} points",
      precision, MAX_POINTS
    )));
  }
  if !longitude.is_finite() || !latitude.is_finite() {
    return Err(Error::InvalidOptions(format!(
      "circle center must be finite, got ({}, {})",
      longitude, latitude
    )));
  }

  let ring = circle_ring(longitude, latitude, radius, precision);
  debug!(
    "circle around ({}, {}) radius {}: {} points",
    longitude,
    latitude,
    radius,
    ring.len()
  );
  Ok(vec![Polygon::from_surface(ring)])
}

fn circle_ring(longitude: f64, latitude: f64, radius: f64, precision: f64) -> Ring<Point> {
  let center = geo::Point::new(longitude, latitude);
  let distance = radius.to_radians() * MEAN_EARTH_RADIUS;

  let mut ring: Ring<Point> = (0..)
    .map(|k| k as f64 * precision)
    .take_while(|bearing| *bearing < 360.0 - BEARING_TOLERANCE)
    .map(|bearing| {
      let p = center.haversine_destination(bearing, distance);
      Point(p.x(), p.y())
    })
    .collect();
  if let Some(&first) = ring.first() {
    ring.push(first);
  }
  ring
}
