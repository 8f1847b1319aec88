//! Background geometry covering a longitude/latitude box.
//!
//! Projections break down at the poles and at the antimeridian, and a single
//! polygon spanning more than a quarter of the globe does not always rasterize
//! correctly. The box is therefore cut into a row of equally wide slices, each
//! traced densely enough along its north and south edges for the projected
//! outline to bend smoothly.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::geom::{BoundingBox, MultiPolygon, Point, Polygon, Ring};
use crate::options::{BackgroundOptions, MAX_POINTS};

/// A traced coordinate this close to the end of its edge is the end corner.
const TRACE_TOLERANCE: f64 = 1e-9;

/// Tiles the box with the default [`BackgroundOptions`].
pub fn background(north: f64, east: f64, south: f64, west: f64) -> Result<MultiPolygon<Point>> {
  background_with(
    &BoundingBox::new(north, east, south, west),
    &BackgroundOptions::default(),
  )
}

/// Tiles `bbox` into slices no wider than `options.max_slice_width`.
///
/// Slices are returned west to east. Each is a surface-only polygon whose
/// closed ring starts at the slice's north-west corner and runs east along
/// the north edge, south along the east edge, west along the south edge and
/// north along the west edge back to the starting corner. Every edge includes
/// both of its corners.
pub fn background_with(
  bbox: &BoundingBox,
  options: &BackgroundOptions,
) -> Result<MultiPolygon<Point>> {
  options.validate()?;
  let bbox = nudge_boundaries(bbox, options.boundary_epsilon);
  check_bounding_box(&bbox)?;

  let span_long = bbox.longitude_span();
  let span_lat = bbox.latitude_span();
  let slice_count = (span_long / options.max_slice_width).ceil();
  let step_long = f64::min(options.max_slice_width, span_long / slice_count);
  let lat_segments = (span_lat / options.max_trace_height).ceil();
  let step_lat = span_lat / lat_segments;

  let edge_points = (step_long / options.edge_step).ceil() + 1.0;
  let point_count = slice_count * (2.0 * edge_points + 2.0 * (lat_segments + 1.0));
  if point_count > MAX_POINTS as f64 {
    return Err(Error::InvalidOptions(format!(
      "{:?} would trace about {} points, the limit is {}",
      options, point_count, MAX_POINTS
    )));
  }

  let slice_count = slice_count as usize;
  debug!(
    "tiling {:?} into {} slices (step_long {}, step_lat {})",
    bbox, slice_count, step_long, step_lat
  );

  let mut result = Vec::with_capacity(slice_count);
  for i in 0..slice_count {
    let ln = bbox.west + step_long * i as f64;
    // the last slice is clamped so the row ends exactly at `east`
    let far = if i + 1 == slice_count {
      bbox.east
    } else {
      bbox.west + step_long * (i + 1) as f64
    };
    let ring = trace_slice(ln, far, &bbox, step_lat, options.edge_step);
    trace!("slice {} [{}, {}]: {} points", i, ln, far, ring.len());
    result.push(Polygon::from_surface(ring));
  }
  Ok(result)
}

fn nudge_boundaries(bbox: &BoundingBox, epsilon: f64) -> BoundingBox {
  let mut out = *bbox;
  if out.west == -180.0 {
    out.west = -180.0 + epsilon;
  }
  if out.south == -90.0 {
    out.south = -90.0 + epsilon;
  }
  if out.north == 90.0 {
    out.north = 90.0 - epsilon;
  }
  if out.east == 180.0 {
    out.east = 180.0 - epsilon;
  }
  out
}

fn check_bounding_box(bbox: &BoundingBox) -> Result<()> {
  let finite = [bbox.north, bbox.east, bbox.south, bbox.west]
    .iter()
    .all(|v| v.is_finite());
  if !finite || bbox.longitude_span() <= 0.0 || bbox.latitude_span() <= 0.0 {
    return Err(Error::InvalidBoundingBox {
      north: bbox.north,
      east: bbox.east,
      south: bbox.south,
      west: bbox.west,
    });
  }
  Ok(())
}

fn trace_slice(ln: f64, far: f64, bbox: &BoundingBox, step_lat: f64, edge_step: f64) -> Ring<Point> {
  let mut ring = Vec::new();
  // north edge, west to east
  for x in edge_values(ln, far, edge_step) {
    ring.push(Point(x, bbox.north));
  }
  // east edge, north to south
  for y in edge_values(bbox.north, bbox.south, step_lat) {
    ring.push(Point(far, y));
  }
  // south edge, east to west
  for x in edge_values(far, ln, edge_step) {
    ring.push(Point(x, bbox.south));
  }
  // west edge, south to north
  for y in edge_values(bbox.south, bbox.north, step_lat) {
    ring.push(Point(ln, y));
  }
  ring
}

// Values from `start` to `end` in increments of `step`. Both ends are
// included and `end` is emitted exactly.
fn edge_values(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
  let length = (end - start).abs();
  let direction = if end < start { -1.0 } else { 1.0 };
  (0..)
    .map(move |k| k as f64 * step)
    .take_while(move |offset| *offset < length - TRACE_TOLERANCE)
    .map(move |offset| start + direction * offset)
    .chain(std::iter::once(end))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::BOUNDARY_EPSILON;

  fn surface(polygon: &Polygon<Point>) -> &Ring<Point> {
    polygon.surface.as_ref().unwrap()
  }

  fn slice_extent(polygon: &Polygon<Point>) -> (f64, f64) {
    let ring = surface(polygon);
    let min = ring.iter().map(|p| p.x()).fold(f64::INFINITY, f64::min);
    let max = ring.iter().map(|p| p.x()).fold(f64::NEG_INFINITY, f64::max);
    (min, max)
  }

  #[test]
  fn test_edge_values() {
    assert_eq!(
      edge_values(-10.0, 10.0, 5.0).collect::<Vec<_>>(),
      vec![-10.0, -5.0, 0.0, 5.0, 10.0]
    );
    assert_eq!(
      edge_values(10.0, -10.0, 5.0).collect::<Vec<_>>(),
      vec![10.0, 5.0, 0.0, -5.0, -10.0]
    );
    assert_eq!(
      edge_values(0.0, 12.0, 5.0).collect::<Vec<_>>(),
      vec![0.0, 5.0, 10.0, 12.0]
    );
    assert_eq!(edge_values(0.0, 0.0, 5.0).collect::<Vec<_>>(), vec![0.0]);
  }

  #[test]
  fn test_wide_box_is_cut_into_four_slices() {
    let result = background(80.0, 170.0, -80.0, -170.0).unwrap();
    assert_eq!(result.len(), 4);

    let extents: Vec<(f64, f64)> = result.iter().map(slice_extent).collect();
    assert_eq!(extents[0].0, -170.0);
    assert_eq!(extents[3].1, 170.0);
    for pair in extents.windows(2) {
      assert_eq!(pair[0].1, pair[1].0);
    }
    for (min, max) in extents {
      assert!((max - min - 85.0).abs() < 1e-9);
    }
  }

  #[test]
  fn test_slices_are_surface_only() {
    for polygon in background(80.0, 170.0, -80.0, -170.0).unwrap() {
      assert!(polygon.surface.is_some());
      assert!(polygon.hole.is_none());
    }
  }

  #[test]
  fn test_boundaries_are_nudged() {
    let result = background(90.0, 180.0, -90.0, -180.0).unwrap();
    assert_eq!(result.len(), 4);
    for polygon in &result {
      for p in surface(polygon) {
        assert!(p.y() != 90.0 && p.y() != -90.0);
        assert!(p.x() != 180.0 && p.x() != -180.0);
      }
    }
    let first = surface(&result[0]);
    assert_eq!(first[0], Point(-180.0 + BOUNDARY_EPSILON, 90.0 - BOUNDARY_EPSILON));
    let (_, max) = slice_extent(&result[3]);
    assert_eq!(max, 180.0 - BOUNDARY_EPSILON);
    assert!((max - 179.9999).abs() < 1e-9);
  }

  #[test]
  fn test_small_box_ring() {
    let result = background(10.0, 10.0, -10.0, -10.0).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(
      surface(&result[0]),
      &vec![
        // north edge
        Point(-10.0, 10.0),
        Point(-5.0, 10.0),
        Point(0.0, 10.0),
        Point(5.0, 10.0),
        Point(10.0, 10.0),
        // east edge, a single vertical step of 20
        Point(10.0, 10.0),
        Point(10.0, -10.0),
        // south edge
        Point(10.0, -10.0),
        Point(5.0, -10.0),
        Point(0.0, -10.0),
        Point(-5.0, -10.0),
        Point(-10.0, -10.0),
        // west edge
        Point(-10.0, -10.0),
        Point(-10.0, 10.0),
      ]
    );
  }

  #[test]
  fn test_ring_is_closed_at_north_west_corner() {
    let result = background(80.0, 170.0, -80.0, -170.0).unwrap();
    for polygon in &result {
      let ring = surface(polygon);
      let (west, east) = slice_extent(polygon);
      assert_eq!(ring.first(), Some(&Point(west, 80.0)));
      assert_eq!(ring.last(), Some(&Point(west, 80.0)));
      // the west edge climbs from -80 in steps of 160 / 2
      assert_eq!(ring[ring.len() - 2], Point(west, 0.0));
      // the north edge ends on the far corner
      let north_edge: Vec<&Point> = ring.iter().take_while(|p| p.y() == 80.0).collect();
      assert!(north_edge.contains(&&Point(east, 80.0)));
    }
  }

  #[test]
  fn test_remainder_slice_is_clamped() {
    let options = BackgroundOptions {
      max_slice_width: 40.0,
      ..Default::default()
    };
    let result = background_with(&BoundingBox::new(10.0, 100.0, 0.0, 0.0), &options).unwrap();
    // ceil(100 / 40) = 3 slices of 33.33..
    assert_eq!(result.len(), 3);
    let (_, max) = slice_extent(&result[2]);
    assert_eq!(max, 100.0);
  }

  #[test]
  fn test_degenerate_boxes_are_rejected() {
    assert!(matches!(
      background(10.0, 5.0, -10.0, 5.0),
      Err(Error::InvalidBoundingBox { .. })
    ));
    assert!(matches!(
      background(10.0, 10.0, 10.0, -10.0),
      Err(Error::InvalidBoundingBox { .. })
    ));
    assert!(background(-10.0, 10.0, 10.0, -10.0).is_err());
    assert!(background(f64::NAN, 10.0, -10.0, -10.0).is_err());
  }

  #[test]
  fn test_invalid_options_are_rejected() {
    let options = BackgroundOptions {
      edge_step: -5.0,
      ..Default::default()
    };
    assert!(matches!(
      background_with(&BoundingBox::new(10.0, 10.0, -10.0, -10.0), &options),
      Err(Error::InvalidOptions(_))
    ));
  }

  #[test]
  fn test_tiny_steps_are_rejected_before_allocating() {
    let bbox = BoundingBox::new(10.0, 10.0, -10.0, -10.0);
    for options in [
      BackgroundOptions {
        max_slice_width: 1e-12,
        ..Default::default()
      },
      BackgroundOptions {
        max_trace_height: 1e-12,
        ..Default::default()
      },
      BackgroundOptions {
        edge_step: 1e-12,
        ..Default::default()
      },
    ] {
      assert!(matches!(
        background_with(&bbox, &options),
        Err(Error::InvalidOptions(_))
      ));
    }
    // fine steps below the limit still trace
    let options = BackgroundOptions {
      edge_step: 0.01,
      ..Default::default()
    };
    let result = background_with(&bbox, &options).unwrap();
    assert_eq!(surface(&result[0]).len(), 2 * 2001 + 2 * 2);
  }
}
