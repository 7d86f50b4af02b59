//! Multi-touch contacts and the per-contact phase state machine.

use std::fmt;

use hashbrown::HashMap;
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;
use tracing::trace;

use crate::Point;

/// Lifecycle stage of one contact. Wire value `0` is the unset sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum TouchPhase {
  Start  = 1,
  Move   = 2,
  End    = 3,
  Cancel = 4,
}

impl TouchPhase {
  pub const fn from_wire(value: i32) -> Option<Self> {
    match value {
      1 => Some(Self::Start),
      2 => Some(Self::Move),
      3 => Some(Self::End),
      4 => Some(Self::Cancel),
      _ => None,
    }
  }

  pub const fn to_wire(self) -> i32 {
    self as i32
  }

  pub const fn is_terminal(self) -> bool {
    matches!(self, Self::End | Self::Cancel)
  }
}

/// Identity of one contact across its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchId {
  pub device_id: u64,
  pub id:        u64,
}

impl fmt::Display for TouchId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.device_id, self.id)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
  pub device_id: u64,
  pub id:        u64,
  pub phase:     TouchPhase,
  pub pos:       Point,
  /// Zero when the device cannot sense pressure.
  #[serde(default)]
  pub force:     f32,
}

impl Touch {
  pub const fn touch_id(&self) -> TouchId {
    TouchId {
      device_id: self.device_id,
      id:        self.id,
    }
  }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TouchViolation {
  #[error("touch {0} started again before it ended")]
  DuplicateStart(TouchId),
  #[error("touch {id} reported {phase:?} without a start")]
  NotStarted { id: TouchId, phase: TouchPhase },
  #[error("touch {id} started with {limit} contacts already active")]
  TooManyContacts { id: TouchId, limit: usize },
}

/// Contacts a [`TouchTracker`] holds at once. Starts beyond this are
/// reported and not tracked.
pub const MAX_ACTIVE_TOUCHES: usize = 64;

/// Consumer-side check of `Start -> Move* -> (End | Cancel)` per contact.
///
/// State outlives a single frame: feed every touch of every frame in
/// delivery order. A violation is reported but the tracker still applies
/// the event, so one bad contact does not poison the rest of the stream.
///
/// Contacts that never end stay active. Call [`TouchTracker::clear`] when
/// the surface loses focus, since the platform stops reporting ends then.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
  active: HashMap<TouchId, Point>,
}

impl TouchTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn observe(&mut self, touch: &Touch) -> Result<(), TouchViolation> {
    let id = touch.touch_id();
    trace!(%id, phase = ?touch.phase, "touch");
    match touch.phase {
      TouchPhase::Start => {
        if self.active.len() >= MAX_ACTIVE_TOUCHES && !self.active.contains_key(&id) {
          return Err(TouchViolation::TooManyContacts {
            id,
            limit: MAX_ACTIVE_TOUCHES,
          });
        }
        if self.active.insert(id, touch.pos).is_some() {
          return Err(TouchViolation::DuplicateStart(id));
        }
      },
      TouchPhase::Move => {
        let Some(pos) = self.active.get_mut(&id) else {
          return Err(TouchViolation::NotStarted {
            id,
            phase: touch.phase,
          });
        };
        *pos = touch.pos;
      },
      TouchPhase::End | TouchPhase::Cancel => {
        if self.active.remove(&id).is_none() {
          return Err(TouchViolation::NotStarted {
            id,
            phase: touch.phase,
          });
        }
      },
    }
    Ok(())
  }

  pub fn is_active(&self, id: TouchId) -> bool {
    self.active.contains_key(&id)
  }

  /// Last reported position of an active contact.
  pub fn position(&self, id: TouchId) -> Option<Point> {
    self.active.get(&id).copied()
  }

  pub fn active_count(&self) -> usize {
    self.active.len()
  }

  /// Forgets every active contact, e.g. on focus loss.
  pub fn clear(&mut self) {
    self.active.clear();
  }
}
