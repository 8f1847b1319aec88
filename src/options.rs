use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MAX_SLICE_WIDTH: f64 = 90.0;
pub const MAX_TRACE_HEIGHT: f64 = 90.0;
/// Tracing density along the north and south edges, in degrees of longitude.
pub const EDGE_STEP: f64 = 5.0;
/// Distance kept from the poles and the antimeridian, in degrees.
pub const BOUNDARY_EPSILON: f64 = 0.0001;
/// Most points a single call may generate. Steps fine enough to exceed it
/// are rejected as invalid options.
pub const MAX_POINTS: usize = 1_000_000;

/// Tunables for [`crate::background_with`].
///
/// Every field falls back to its default when missing from a configuration
/// file.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackgroundOptions {
  /// Widest slice emitted, in degrees of longitude.
  pub max_slice_width: f64,
  /// Largest vertical step along the east and west edges of a slice.
  pub max_trace_height: f64,
  /// Step along the north and south edges of a slice.
  pub edge_step: f64,
  /// How far exact pole or antimeridian values are moved inward.
  pub boundary_epsilon: f64,
}

impl Default for BackgroundOptions {
  fn default() -> Self {
    BackgroundOptions {
      max_slice_width: MAX_SLICE_WIDTH,
      max_trace_height: MAX_TRACE_HEIGHT,
      edge_step: EDGE_STEP,
      boundary_epsilon: BOUNDARY_EPSILON,
    }
  }
}

impl BackgroundOptions {
  pub fn validate(&self) -> Result<()> {
    let fields = [
      ("max_slice_width", self.max_slice_width),
      ("max_trace_height", self.max_trace_height),
      ("edge_step", self.edge_step),
    ];
    for (name, value) in fields {
      if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidOptions(format!(
          "{} must be a positive number, got {}",
          name, value
        )));
      }
    }
    if !self.boundary_epsilon.is_finite() || self.boundary_epsilon < 0.0 {
      return Err(Error::InvalidOptions(format!(
        "boundary_epsilon must not be negative, got {}",
        self.boundary_epsilon
      )));
    }
    Ok(())
  }
}
