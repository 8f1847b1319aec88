use thiserror::Error;

/// Errors returned by the geometry generators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
  #[error(
    "invalid bounding box (north {north}, east {east}, south {south}, west {west}): spans must be finite and positive"
  )]
  InvalidBoundingBox {
    north: f64,
    east: f64,
    south: f64,
    west: f64,
  },

  #[error("invalid circle radius: {0}")]
  InvalidRadius(f64),

  #[error("invalid options: {0}")]
  InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, Error>;
