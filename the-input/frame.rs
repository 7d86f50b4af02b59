//! The per-tick envelope handed from the platform layer to the UI core.

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  Event,
  Modifiers,
  Point,
  Rect,
};

/// Everything the UI core needs for one frame.
///
/// Geometry, scale and timing are populated even when `events` is empty,
/// so a frame can be interpreted without looking at earlier frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
  pub screen_rect:      Rect,
  pub pixels_per_point: f32,
  pub max_texture_side: u32,
  /// Seconds since an arbitrary producer-chosen epoch.
  pub time:             f64,
  pub predicted_dt:     f32,
  /// Chronological order of occurrence within the frame.
  pub events:           Vec<Event>,
  pub has_focus:        bool,
  /// Modifier state when the frame was assembled, independent of the
  /// snapshots carried by individual events.
  pub modifiers:        Modifiers,
}

impl Default for Input {
  fn default() -> Self {
    Self {
      screen_rect:      Rect::default(),
      pixels_per_point: 1.0,
      max_texture_side: 0,
      time:             0.0,
      predicted_dt:     1.0 / 60.0,
      events:           Vec::new(),
      has_focus:        false,
      modifiers:        Modifiers::NONE,
    }
  }
}

impl Input {
  pub fn new(screen_rect: Rect, pixels_per_point: f32) -> Self {
    Self {
      screen_rect,
      pixels_per_point,
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_time(mut self, time: f64) -> Self {
    self.time = time;
    self
  }

  #[must_use]
  pub fn with_focus(mut self, has_focus: bool) -> Self {
    self.has_focus = has_focus;
    self
  }

  #[must_use]
  pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
    self.modifiers = modifiers;
    self
  }

  #[must_use]
  pub fn with_event(mut self, event: impl Into<Event>) -> Self {
    self.events.push(event.into());
    self
  }

  /// Checks the invariants a producer is trusted to uphold but the wire
  /// cannot express.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if !(self.pixels_per_point.is_finite() && self.pixels_per_point > 0.0) {
      return Err(ValidationError::PixelsPerPoint(self.pixels_per_point));
    }
    if !self.screen_rect.is_ordered() {
      return Err(ValidationError::InvertedScreenRect {
        min: self.screen_rect.min,
        max: self.screen_rect.max,
      });
    }
    if !self.time.is_finite() {
      return Err(ValidationError::Time(self.time));
    }
    if !(self.predicted_dt.is_finite() && self.predicted_dt >= 0.0) {
      return Err(ValidationError::PredictedDt(self.predicted_dt));
    }

    for (index, event) in self.events.iter().enumerate() {
      match event {
        Event::Touch(touch) if !(touch.force.is_finite() && touch.force >= 0.0) => {
          return Err(ValidationError::TouchForce {
            index,
            force: touch.force,
          });
        },
        Event::Zoom(factor) if !factor.is_finite() => {
          return Err(ValidationError::ZoomFactor {
            index,
            factor: *factor,
          });
        },
        _ => {},
      }
    }

    Ok(())
  }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
  #[error("pixels_per_point must be finite and positive, got {0}")]
  PixelsPerPoint(f32),
  #[error("screen_rect min {min:?} exceeds max {max:?}")]
  InvertedScreenRect { min: Point, max: Point },
  #[error("frame time must be finite, got {0}")]
  Time(f64),
  #[error("predicted_dt must be finite and non-negative, got {0}")]
  PredictedDt(f32),
  #[error("event {index}: touch force must be finite and non-negative, got {force}")]
  TouchForce { index: usize, force: f32 },
  #[error("event {index}: zoom factor must be finite, got {factor}")]
  ZoomFactor { index: usize, factor: f32 },
}
