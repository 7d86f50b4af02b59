//! Logical keys and key transitions.

use serde::{
  Deserialize,
  Serialize,
};

use crate::Modifiers;

macro_rules! key_types {
  ($($(#[$meta:meta])* $name:ident = $value:literal,)*) => {
    /// A key as the active layout names it, not a scancode.
    ///
    /// Discriminants are the wire values. Wire value `0` is the unset
    /// sentinel and has no variant, so an explicit "no key" event cannot
    /// be built.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[repr(i32)]
    pub enum KeyType {
      $($(#[$meta])* $name = $value,)*
    }

    impl KeyType {
      pub const ALL: &'static [KeyType] = &[$(KeyType::$name,)*];

      pub const fn from_wire(value: i32) -> Option<Self> {
        match value {
          $($value => Some(Self::$name),)*
          _ => None,
        }
      }

      pub const fn name(self) -> &'static str {
        match self {
          $(Self::$name => stringify!($name),)*
        }
      }
    }
  };
}

key_types! {
  ArrowDown = 1,
  ArrowLeft = 2,
  ArrowRight = 3,
  ArrowUp = 4,
  Escape = 5,
  Tab = 6,
  Backspace = 7,
  Enter = 8,
  Space = 9,
  Insert = 10,
  Delete = 11,
  Home = 12,
  End = 13,
  PageUp = 14,
  PageDown = 15,
  Num0 = 16,
  Num1 = 17,
  Num2 = 18,
  Num3 = 19,
  Num4 = 20,
  Num5 = 21,
  Num6 = 22,
  Num7 = 23,
  Num8 = 24,
  Num9 = 25,
  A = 26,
  B = 27,
  C = 28,
  D = 29,
  E = 30,
  F = 31,
  G = 32,
  H = 33,
  I = 34,
  J = 35,
  K = 36,
  L = 37,
  M = 38,
  N = 39,
  O = 40,
  P = 41,
  Q = 42,
  R = 43,
  S = 44,
  T = 45,
  U = 46,
  V = 47,
  W = 48,
  X = 49,
  Y = 50,
  Z = 51,
  F1 = 52,
  F2 = 53,
  F3 = 54,
  F4 = 55,
  F5 = 56,
  F6 = 57,
  F7 = 58,
  F8 = 59,
  F9 = 60,
  F10 = 61,
  F11 = 62,
  F12 = 63,
  F13 = 64,
  F14 = 65,
  F15 = 66,
  F16 = 67,
  F17 = 68,
  F18 = 69,
  F19 = 70,
  F20 = 71,
  /// Appended after `F20`. Producers built against the 71-key layout
  /// never send it.
  Minus = 72,
  /// Appended after `F20` with [`KeyType::Minus`]; absent from the
  /// 71-key layout.
  PlusEquals = 73,
}

impl KeyType {
  pub const fn to_wire(self) -> i32 {
    self as i32
  }
}

/// One edge of a key: a press or a release.
///
/// Auto-repeat arrives as repeated presses with no release in between;
/// interpreting that is up to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
  pub key:       KeyType,
  pub pressed:   bool,
  #[serde(default)]
  pub modifiers: Modifiers,
}

impl Key {
  pub const fn press(key: KeyType, modifiers: Modifiers) -> Self {
    Self {
      key,
      pressed: true,
      modifiers,
    }
  }

  pub const fn release(key: KeyType, modifiers: Modifiers) -> Self {
    Self {
      key,
      pressed: false,
      modifiers,
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn wire_values_are_dense_and_stable() {
    assert_eq!(KeyType::ALL.len(), 73);
    for (index, key) in KeyType::ALL.iter().enumerate() {
      assert_eq!(key.to_wire(), index as i32 + 1);
      assert_eq!(KeyType::from_wire(key.to_wire()), Some(*key));
    }
    assert_eq!(KeyType::A.to_wire(), 26);
    assert_eq!(KeyType::F20.to_wire(), 71);
  }

  #[test]
  fn punctuation_keys_follow_the_function_keys() {
    assert_eq!(KeyType::Minus.to_wire(), 72);
    assert_eq!(KeyType::PlusEquals.to_wire(), 73);
    assert_eq!(KeyType::from_wire(72), Some(KeyType::Minus));
    assert_eq!(&KeyType::ALL[71..], [KeyType::Minus, KeyType::PlusEquals]);
  }

  #[test]
  fn sentinel_and_unknown_values_have_no_key() {
    assert_eq!(KeyType::from_wire(0), None);
    assert_eq!(KeyType::from_wire(74), None);
    assert_eq!(KeyType::from_wire(-3), None);
  }

  #[test]
  fn names_match_variants() {
    assert_eq!(KeyType::PlusEquals.name(), "PlusEquals");
    assert_eq!(KeyType::Num7.name(), "Num7");
  }
}
