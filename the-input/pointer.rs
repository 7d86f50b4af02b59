use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  Modifiers,
  Point,
};

/// Pointer buttons. Wire value `0` is the unset sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ButtonType {
  Primary   = 1,
  Secondary = 2,
  Middle    = 3,
  Extra1    = 4,
  Extra2    = 5,
}

impl ButtonType {
  pub const fn from_wire(value: i32) -> Option<Self> {
    match value {
      1 => Some(Self::Primary),
      2 => Some(Self::Secondary),
      3 => Some(Self::Middle),
      4 => Some(Self::Extra1),
      5 => Some(Self::Extra2),
      _ => None,
    }
  }

  pub const fn to_wire(self) -> i32 {
    self as i32
  }
}

/// A button going down or up at `pos`, in the same coordinate space as
/// the frame's screen rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerButton {
  pub pos:       Point,
  pub button:    ButtonType,
  pub pressed:   bool,
  #[serde(default)]
  pub modifiers: Modifiers,
}

impl PointerButton {
  pub const fn new(pos: Point, button: ButtonType, pressed: bool, modifiers: Modifiers) -> Self {
    Self {
      pos,
      button,
      pressed,
      modifiers,
    }
  }
}
