//! Consumer-side state threaded across frames.

use std::fmt;

use smallvec::SmallVec;
use tracing::{
  debug,
  warn,
};

use crate::{
  CompositionStep,
  CompositionTracker,
  CompositionViolation,
  Event,
  Input,
  TouchTracker,
  TouchViolation,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
  Touch {
    index:     usize,
    violation: TouchViolation,
  },
  Composition {
    index:     usize,
    violation: CompositionViolation,
  },
  /// Frames are expected in emission order; this is reported, not enforced.
  TimeWentBackwards { previous: f64, current: f64 },
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Touch { index, violation } => write!(f, "event {index}: {violation}"),
      Self::Composition { index, violation } => write!(f, "event {index}: {violation}"),
      Self::TimeWentBackwards { previous, current } => {
        write!(f, "frame time {current} is earlier than previous {previous}")
      },
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
  /// Zero-based sequence number of the frame within the session.
  pub frame:      u64,
  pub violations: SmallVec<[Violation; 4]>,
  pub commits:    SmallVec<[String; 1]>,
}

impl SessionReport {
  pub fn is_clean(&self) -> bool {
    self.violations.is_empty()
  }
}

/// Feeds decoded frames, in delivery order, through the touch and
/// composition trackers. Active contacts are forgotten when focus is lost.
#[derive(Debug, Clone, Default)]
pub struct InputSession {
  touches:     TouchTracker,
  composition: CompositionTracker,
  last_time:   Option<f64>,
  had_focus:   bool,
  frames:      u64,
}

impl InputSession {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn touches(&self) -> &TouchTracker {
    &self.touches
  }

  pub fn composition(&self) -> &CompositionTracker {
    &self.composition
  }

  pub fn frames(&self) -> u64 {
    self.frames
  }

  pub fn accept(&mut self, input: &Input) -> SessionReport {
    let mut report = SessionReport {
      frame: self.frames,
      ..SessionReport::default()
    };
    self.frames += 1;

    if let Some(previous) = self.last_time
      && input.time < previous
    {
      report.violations.push(Violation::TimeWentBackwards {
        previous,
        current: input.time,
      });
    }
    self.last_time = Some(input.time);

    if self.had_focus && !input.has_focus {
      debug!(
        frame = report.frame,
        active = self.touches.active_count(),
        "focus lost, dropping active touches"
      );
      self.touches.clear();
    }
    self.had_focus = input.has_focus;

    for (index, event) in input.events.iter().enumerate() {
      if let Event::Touch(touch) = event
        && let Err(violation) = self.touches.observe(touch)
      {
        report.violations.push(Violation::Touch { index, violation });
      }

      match self.composition.observe(event) {
        Ok(Some(CompositionStep::Committed(text))) => report.commits.push(text),
        Ok(_) => {},
        Err(violation) => {
          report
            .violations
            .push(Violation::Composition { index, violation })
        },
      }
    }

    for violation in &report.violations {
      warn!(frame = report.frame, %violation, "input stream violation");
    }
    report
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }
}
