use std::ops::BitOr;

use serde::{
  Deserialize,
  Serialize,
};

/// Modifier keys held at one instant.
///
/// `command` is the platform's primary shortcut modifier: Ctrl everywhere
/// except Apple platforms, where it is Cmd. `mac_cmd` is the physical Cmd
/// key and is independent of `command`, so both can be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
  pub alt:     bool,
  pub ctrl:    bool,
  pub shift:   bool,
  pub mac_cmd: bool,
  pub command: bool,
}

impl Modifiers {
  pub const NONE: Self = Self {
    alt:     false,
    ctrl:    false,
    shift:   false,
    mac_cmd: false,
    command: false,
  };
  pub const ALT: Self = Self {
    alt: true,
    ..Self::NONE
  };
  pub const CTRL: Self = Self {
    ctrl: true,
    ..Self::NONE
  };
  pub const SHIFT: Self = Self {
    shift: true,
    ..Self::NONE
  };

  /// The chord produced by pressing the primary modifier alone.
  pub const fn primary(apple: bool) -> Self {
    Self {
      ctrl: !apple,
      mac_cmd: apple,
      command: true,
      ..Self::NONE
    }
  }

  #[must_use]
  pub const fn is_none(self) -> bool {
    !self.any()
  }

  #[must_use]
  pub const fn any(self) -> bool {
    self.alt || self.ctrl || self.shift || self.mac_cmd || self.command
  }

  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self {
      alt:     self.alt || other.alt,
      ctrl:    self.ctrl || other.ctrl,
      shift:   self.shift || other.shift,
      mac_cmd: self.mac_cmd || other.mac_cmd,
      command: self.command || other.command,
    }
  }
}

impl BitOr for Modifiers {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}
