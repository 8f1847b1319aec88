//! Conversions between `[x, y]` points and `{longitude, latitude}` records.
//!
//! Every conversion keeps the shape of its input: same lengths, same order,
//! same ring slots. Values are relabeled, never checked or projected.

use crate::geom::{GeoPoint, Line, MultiLine, MultiPolygon, Point, Polygon};

impl From<Point> for GeoPoint {
  fn from(point: Point) -> GeoPoint {
    point_to_geo(point)
  }
}

impl From<GeoPoint> for Point {
  fn from(point: GeoPoint) -> Point {
    geo_to_point(point)
  }
}

pub fn point_to_geo(point: Point) -> GeoPoint {
  GeoPoint {
    longitude: point.0,
    latitude: point.1,
  }
}

pub fn geo_to_point(point: GeoPoint) -> Point {
  Point(point.longitude, point.latitude)
}

pub fn multi_point_to_geo(points: &[Point]) -> Line<GeoPoint> {
  points.iter().map(|&p| point_to_geo(p)).collect()
}

pub fn multi_geo_to_point(points: &[GeoPoint]) -> Line<Point> {
  points.iter().map(|&p| geo_to_point(p)).collect()
}

pub fn multi_line_to_geo(lines: &[Line<Point>]) -> MultiLine<GeoPoint> {
  lines.iter().map(|line| multi_point_to_geo(line)).collect()
}

pub fn multi_geo_line_to_multi_line(lines: &[Line<GeoPoint>]) -> MultiLine<Point> {
  let mut out = Vec::with_capacity(lines.len());
  for line in lines {
    let mut points = Vec::with_capacity(line.len());
    for p in line {
      points.push(Point(p.longitude, p.latitude));
    }
    out.push(points);
  }
  out
}

pub fn multi_polygon_to_geo(polygons: &[Polygon<Point>]) -> MultiPolygon<GeoPoint> {
  polygons
    .iter()
    .map(|polygon| polygon.map(point_to_geo))
    .collect()
}

pub fn multi_geo_polygon_to_multi_polygon(
  polygons: &[Polygon<GeoPoint>],
) -> MultiPolygon<Point> {
  polygons
    .iter()
    .map(|polygon| polygon.map(geo_to_point))
    .collect()
}
