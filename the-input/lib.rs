//! Per-frame user input: the typed model, its wire encoding, and the
//! consumer-side checks that span frames.
//!
//! A platform layer builds one [`Input`] per UI tick and ships it as bytes;
//! the UI core decodes it with [`decode`] (or a configured [`Decoder`]) and
//! feeds the result through an [`InputSession`] when it wants touch and IME
//! continuity checked.

pub mod codec;
pub mod composition;
pub mod config;
pub mod event;
pub mod ffi;
pub mod frame;
pub mod geometry;
pub mod key;
pub mod modifiers;
pub mod pointer;
mod proto;
pub mod session;
pub mod touch;

pub use codec::{
  Codec,
  DecodeError,
  Decoded,
  Decoder,
  Diagnostic,
  Diagnostics,
  EnumKind,
};
pub use composition::{
  CompositionState,
  CompositionStep,
  CompositionTracker,
  CompositionViolation,
};
pub use config::{
  ConfigError,
  DecodeLimits,
};
pub use event::{
  Event,
  EventType,
};
pub use ffi::RawBuffer;
pub use frame::{
  Input,
  ValidationError,
};
pub use geometry::{
  Point,
  Rect,
};
pub use key::{
  Key,
  KeyType,
};
pub use modifiers::Modifiers;
pub use pointer::{
  ButtonType,
  PointerButton,
};
pub use session::{
  InputSession,
  SessionReport,
  Violation,
};
pub use touch::{
  MAX_ACTIVE_TOUCHES,
  Touch,
  TouchId,
  TouchPhase,
  TouchTracker,
  TouchViolation,
};

/// Decodes one frame under the default [`DecodeLimits`].
pub fn decode(bytes: &[u8]) -> codec::Result<Decoded<Input>> {
  Decoder::default().decode(bytes)
}

pub fn encode(input: &Input) -> Vec<u8> {
  input.encode()
}
