//! Value types shared by the mapper, the background tiler and the circle
//! generator.

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A planar coordinate pair. In this crate `x` carries the longitude and `y`
/// the latitude, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point(pub f64, pub f64);

impl Point {
  pub fn x(&self) -> f64 {
    self.0
  }

  pub fn y(&self) -> f64 {
    self.1
  }
}

/// A location addressed by named longitude and latitude fields.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
  pub longitude: f64,
  pub latitude: f64,
}

pub type Line<P> = Vec<P>;
pub type MultiLine<P> = Vec<Line<P>>;
pub type Ring<P> = Vec<P>;
pub type MultiPolygon<P> = Vec<Polygon<P>>;

/// A polygon with an optional outer surface and an optional hole.
///
/// The two slots are independent. A polygon can carry a hole without a
/// surface, in which case the surface slot stays empty and the hole stays in
/// its own slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<P> {
  pub surface: Option<Ring<P>>,
  pub hole: Option<Ring<P>>,
}

impl<P> Polygon<P> {
  pub fn new(surface: Option<Ring<P>>, hole: Option<Ring<P>>) -> Polygon<P> {
    Polygon { surface, hole }
  }

  pub fn from_surface(surface: Ring<P>) -> Polygon<P> {
    Polygon {
      surface: Some(surface),
      hole: None,
    }
  }

  /// Applies `f` to every point of both rings, keeping each ring in its slot.
  pub fn map<Q, F>(&self, mut f: F) -> Polygon<Q>
  where
    P: Copy,
    F: FnMut(P) -> Q,
  {
    Polygon {
      surface: self
        .surface
        .as_ref()
        .map(|ring| ring.iter().map(|&p| f(p)).collect()),
      hole: self
        .hole
        .as_ref()
        .map(|ring| ring.iter().map(|&p| f(p)).collect()),
    }
  }
}

/// A longitude/latitude box in degrees, read west to east.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
  pub north: f64,
  pub east: f64,
  pub south: f64,
  pub west: f64,
}

impl BoundingBox {
  pub fn new(north: f64, east: f64, south: f64, west: f64) -> BoundingBox {
    BoundingBox {
      north,
      east,
      south,
      west,
    }
  }

  pub fn longitude_span(&self) -> f64 {
    self.east - self.west
  }

  pub fn latitude_span(&self) -> f64 {
    self.north - self.south
  }
}

// Polygons travel as an array of rings: `[surface]`, `[surface, hole]` or
// `[[], hole]` when only the hole exists.

#[cfg(feature = "serde")]
impl<P: Serialize> Serialize for Polygon<P> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;

    let empty: &[P] = &[];
    let len = if self.hole.is_some() {
      2
    } else if self.surface.is_some() {
      1
    } else {
      0
    };
    let mut seq = serializer.serialize_seq(Some(len))?;
    if len > 0 {
      seq.serialize_element(self.surface.as_deref().unwrap_or(empty))?;
    }
    if let Some(hole) = &self.hole {
      seq.serialize_element(hole)?;
    }
    seq.end()
  }
}

#[cfg(feature = "serde")]
impl<'de, P: Deserialize<'de>> Deserialize<'de> for Polygon<P> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let rings: Vec<Option<Ring<P>>> = Vec::deserialize(deserializer)?;
    if rings.len() > 2 {
      return Err(de::Error::invalid_length(
        rings.len(),
        &"at most two rings (surface, hole)",
      ));
    }
    let mut slots = rings
      .into_iter()
      .map(|ring| ring.filter(|points| !points.is_empty()));
    let surface = slots.next().flatten();
    let hole = slots.next().flatten();
    Ok(Polygon { surface, hole })
  }
}
