use std::fmt;

use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  Key,
  Point,
  PointerButton,
  Touch,
};

/// Wire discriminator of [`Event`]. Wire value `0` is the unset sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum EventType {
  Copy              = 1,
  Cut               = 2,
  Paste             = 3,
  Text              = 4,
  Key               = 5,
  PointerMoved      = 6,
  PointerButton     = 7,
  PointerGone       = 8,
  Scroll            = 9,
  Zoom              = 10,
  CompositionStart  = 11,
  CompositionUpdate = 12,
  Touch             = 13,
}

impl EventType {
  pub const ALL: [EventType; 13] = [
    Self::Copy,
    Self::Cut,
    Self::Paste,
    Self::Text,
    Self::Key,
    Self::PointerMoved,
    Self::PointerButton,
    Self::PointerGone,
    Self::Scroll,
    Self::Zoom,
    Self::CompositionStart,
    Self::CompositionUpdate,
    Self::Touch,
  ];

  pub const fn from_wire(value: i32) -> Option<Self> {
    match value {
      1 => Some(Self::Copy),
      2 => Some(Self::Cut),
      3 => Some(Self::Paste),
      4 => Some(Self::Text),
      5 => Some(Self::Key),
      6 => Some(Self::PointerMoved),
      7 => Some(Self::PointerButton),
      8 => Some(Self::PointerGone),
      9 => Some(Self::Scroll),
      10 => Some(Self::Zoom),
      11 => Some(Self::CompositionStart),
      12 => Some(Self::CompositionUpdate),
      13 => Some(Self::Touch),
      _ => None,
    }
  }

  pub const fn to_wire(self) -> i32 {
    self as i32
  }

  /// Name of the payload field this tag activates.
  pub const fn payload_field(self) -> &'static str {
    match self {
      Self::Copy => "copy",
      Self::Cut => "cut",
      Self::Paste => "paste",
      Self::Text => "text",
      Self::Key => "key",
      Self::PointerMoved => "pointer_moved",
      Self::PointerButton => "pointer_button",
      Self::PointerGone => "pointer_gone",
      Self::Scroll => "scroll",
      Self::Zoom => "zoom",
      Self::CompositionStart => "composition_start",
      Self::CompositionUpdate => "composition_update",
      Self::Touch => "touch",
    }
  }
}

impl fmt::Display for EventType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Copy => "COPY",
      Self::Cut => "CUT",
      Self::Paste => "PASTE",
      Self::Text => "TEXT",
      Self::Key => "KEY",
      Self::PointerMoved => "POINTER_MOVED",
      Self::PointerButton => "POINTER_BUTTON",
      Self::PointerGone => "POINTER_GONE",
      Self::Scroll => "SCROLL",
      Self::Zoom => "ZOOM",
      Self::CompositionStart => "COMPOSITION_START",
      Self::CompositionUpdate => "COMPOSITION_UPDATE",
      Self::Touch => "TOUCH",
    })
  }
}

/// One input occurrence within a frame.
///
/// IME composition has no explicit end: a `Text` event following
/// `CompositionStart`/`CompositionUpdate` commits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Event {
  Copy,
  Cut,
  Paste(String),
  Text(String),
  Key(Key),
  PointerMoved(Point),
  PointerButton(PointerButton),
  PointerGone,
  /// Scroll delta vector.
  Scroll(Point),
  /// Multiplicative scale delta.
  Zoom(f32),
  CompositionStart,
  /// Current preedit text, replacing any previous preedit.
  CompositionUpdate(String),
  Touch(Touch),
}

impl Event {
  pub const fn event_type(&self) -> EventType {
    match self {
      Self::Copy => EventType::Copy,
      Self::Cut => EventType::Cut,
      Self::Paste(_) => EventType::Paste,
      Self::Text(_) => EventType::Text,
      Self::Key(_) => EventType::Key,
      Self::PointerMoved(_) => EventType::PointerMoved,
      Self::PointerButton(_) => EventType::PointerButton,
      Self::PointerGone => EventType::PointerGone,
      Self::Scroll(_) => EventType::Scroll,
      Self::Zoom(_) => EventType::Zoom,
      Self::CompositionStart => EventType::CompositionStart,
      Self::CompositionUpdate(_) => EventType::CompositionUpdate,
      Self::Touch(_) => EventType::Touch,
    }
  }

  pub fn as_paste(&self) -> Option<&str> {
    match self {
      Self::Paste(text) => Some(text),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(text) => Some(text),
      _ => None,
    }
  }

  pub fn as_key(&self) -> Option<&Key> {
    match self {
      Self::Key(key) => Some(key),
      _ => None,
    }
  }

  pub fn as_pointer_moved(&self) -> Option<Point> {
    match self {
      Self::PointerMoved(pos) => Some(*pos),
      _ => None,
    }
  }

  pub fn as_pointer_button(&self) -> Option<&PointerButton> {
    match self {
      Self::PointerButton(button) => Some(button),
      _ => None,
    }
  }

  pub fn as_scroll(&self) -> Option<Point> {
    match self {
      Self::Scroll(delta) => Some(*delta),
      _ => None,
    }
  }

  pub fn as_zoom(&self) -> Option<f32> {
    match self {
      Self::Zoom(factor) => Some(*factor),
      _ => None,
    }
  }

  pub fn as_composition_update(&self) -> Option<&str> {
    match self {
      Self::CompositionUpdate(preedit) => Some(preedit),
      _ => None,
    }
  }

  pub fn as_touch(&self) -> Option<&Touch> {
    match self {
      Self::Touch(touch) => Some(touch),
      _ => None,
    }
  }
}

impl From<Key> for Event {
  fn from(key: Key) -> Self {
    Self::Key(key)
  }
}

impl From<PointerButton> for Event {
  fn from(button: PointerButton) -> Self {
    Self::PointerButton(button)
  }
}

impl From<Touch> for Event {
  fn from(touch: Touch) -> Self {
    Self::Touch(touch)
  }
}
