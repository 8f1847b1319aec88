//! Geometry helpers for drawing map backgrounds.
//!
//! The crate converts shapes between `[x, y]` points and
//! `{longitude, latitude}` records, cuts a bounding box into slices that are
//! safe to project, and approximates small circles on the sphere.
//!
//! ```
//! let slices = geo_background::background(80.0, 170.0, -80.0, -170.0).unwrap();
//! assert_eq!(slices.len(), 4);
//!
//! let geo = geo_background::multi_polygon_to_geo(&slices);
//! assert_eq!(geo_background::multi_geo_polygon_to_multi_polygon(&geo), slices);
//! ```

pub mod background;
pub mod circle;
pub mod error;
pub mod geom;
pub mod mapper;
pub mod options;

pub use crate::background::{background, background_with};
pub use crate::circle::{circle, circle_with_precision};
pub use crate::error::{Error, Result};
pub use crate::geom::{BoundingBox, GeoPoint, Line, MultiLine, MultiPolygon, Point, Polygon, Ring};
pub use crate::mapper::{
  geo_to_point, multi_geo_line_to_multi_line, multi_geo_polygon_to_multi_polygon,
  multi_geo_to_point, multi_line_to_geo, multi_point_to_geo, multi_polygon_to_geo, point_to_geo,
};
pub use crate::options::BackgroundOptions;
