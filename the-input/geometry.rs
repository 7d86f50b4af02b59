//! Positions and extents in content coordinates.

use serde::{
  Deserialize,
  Serialize,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f32,
  pub y: f32,
}

impl Point {
  pub const ZERO: Self = Self::new(0.0, 0.0);

  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

impl From<(f32, f32)> for Point {
  fn from((x, y): (f32, f32)) -> Self {
    Self::new(x, y)
  }
}

/// Axis-aligned rectangle. Nothing stops a producer from sending
/// `min > max`; [`Rect::is_ordered`] is what validation checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
  pub min: Point,
  pub max: Point,
}

impl Rect {
  pub const fn new(min: Point, max: Point) -> Self {
    Self { min, max }
  }

  pub fn from_min_size(min: Point, width: f32, height: f32) -> Self {
    Self::new(min, Point::new(min.x + width, min.y + height))
  }

  pub fn width(&self) -> f32 {
    self.max.x - self.min.x
  }

  pub fn height(&self) -> f32 {
    self.max.y - self.min.y
  }

  /// True when `min <= max` on both axes. NaN coordinates are never ordered.
  pub fn is_ordered(&self) -> bool {
    self.min.x <= self.max.x && self.min.y <= self.max.y
  }

  pub fn contains(&self, point: Point) -> bool {
    (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
  }
}
