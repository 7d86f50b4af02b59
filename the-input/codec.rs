//! Encoding and decoding between the typed model and wire bytes.
//!
//! Decoding happens in two passes: the wire bytes are parsed into the
//! `prost` mirror in [`crate::proto`], then converted into the typed model.
//! Limits are checked on the raw bytes before the first pass, so an
//! oversized frame is refused without materializing it. The first pass
//! rejects malformed bytes outright. The second trusts each event's tag,
//! ignores payloads that disagree with it, and drops events whose tag (or
//! required enum) is unset or unknown. Everything ignored or dropped is
//! reported in [`Decoded::diagnostics`].

use std::fmt;

use prost::Message;
use smallvec::SmallVec;
use the_wire::WireType;
use thiserror::Error;
use tracing::{
  debug,
  trace,
  warn,
};

use crate::{
  ButtonType,
  DecodeLimits,
  Event,
  EventType,
  Input,
  Key,
  KeyType,
  Modifiers,
  Point,
  PointerButton,
  Rect,
  Touch,
  TouchPhase,
  ValidationError,
  proto,
};

pub type Result<T> = std::result::Result<T, DecodeError>;

pub type Diagnostics = SmallVec<[Diagnostic; 4]>;

/// Enums that carry a reserved unset value on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
  EventType,
  KeyType,
  ButtonType,
  TouchPhase,
}

impl fmt::Display for EnumKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::EventType => "event type",
      Self::KeyType => "key type",
      Self::ButtonType => "button type",
      Self::TouchPhase => "touch phase",
    })
  }
}

/// Something the decoder degraded instead of failing the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
  /// The event at wire position `index` had an unset or unknown enum and
  /// was left out of the frame. `value` is zero when the enum was unset.
  EventDropped {
    index: usize,
    kind:  EnumKind,
    value: i32,
  },
  /// A payload field other than the one `event` selects was present.
  StrayPayload {
    index: usize,
    event: EventType,
    field: &'static str,
  },
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::EventDropped {
        index,
        kind,
        value: 0,
      } => write!(f, "event {index} dropped: {kind} is unset"),
      Self::EventDropped { index, kind, value } => {
        write!(f, "event {index} dropped: unknown {kind} value {value}")
      },
      Self::StrayPayload {
        index,
        event,
        field,
      } => write!(f, "event {index} ({event}) carries unrelated `{field}` payload, ignored"),
    }
  }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
  #[error(transparent)]
  Wire(#[from] prost::DecodeError),
  #[error("frame of {len} bytes exceeds the {max} byte limit")]
  FrameTooLarge { len: usize, max: usize },
  #[error("frame carries {count} events, more than the limit of {max}")]
  TooManyEvents { count: usize, max: usize },
  #[error("{field} string of {len} bytes exceeds the {max} byte limit")]
  StringTooLong {
    field: &'static str,
    len:   usize,
    max:   usize,
  },
  #[error("{kind} is unset or unknown (wire value {value})")]
  Unset { kind: EnumKind, value: i32 },
  #[error("invalid frame: {0}")]
  Invalid(#[from] ValidationError),
}

/// A decoded value together with everything that was degraded to get it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
  pub value:       T,
  pub diagnostics: Diagnostics,
}

impl<T> Decoded<T> {
  pub fn clean(value: T) -> Self {
    Self {
      value,
      diagnostics: Diagnostics::new(),
    }
  }

  pub fn is_clean(&self) -> bool {
    self.diagnostics.is_empty()
  }

  pub fn into_value(self) -> T {
    self.value
  }
}

/// Decodes frames under a fixed set of [`DecodeLimits`].
#[derive(Debug, Clone, Default)]
pub struct Decoder {
  limits: DecodeLimits,
}

impl Decoder {
  pub fn new(limits: DecodeLimits) -> Self {
    Self { limits }
  }

  pub fn limits(&self) -> &DecodeLimits {
    &self.limits
  }

  /// Decodes one frame. Malformed bytes and exceeded limits reject the
  /// whole frame; nothing partial is returned.
  pub fn decode(&self, bytes: &[u8]) -> Result<Decoded<Input>> {
    let result = self.decode_frame(bytes);
    match &result {
      Ok(decoded) => {
        trace!(
          bytes = bytes.len(),
          events = decoded.value.events.len(),
          diagnostics = decoded.diagnostics.len(),
          "decoded input frame"
        );
      },
      Err(err) => debug!(%err, bytes = bytes.len(), "rejected input frame"),
    }
    result
  }

  fn decode_frame(&self, bytes: &[u8]) -> Result<Decoded<Input>> {
    self.check_size(bytes)?;
    self.check_frame(bytes)?;
    let pb = proto::Input::decode(bytes)?;
    let mut cx = Context::default();
    let input = cx.input(pb)?;
    if self.limits.validate {
      input.validate()?;
    }
    Ok(Decoded {
      value:       input,
      diagnostics: cx.diagnostics,
    })
  }

  fn check_size(&self, bytes: &[u8]) -> Result<()> {
    if bytes.len() > self.limits.max_frame_bytes {
      return Err(DecodeError::FrameTooLarge {
        len: bytes.len(),
        max: self.limits.max_frame_bytes,
      });
    }
    Ok(())
  }

  fn message<M: Message + Default>(&self, bytes: &[u8]) -> Result<M> {
    self.check_size(bytes)?;
    Ok(M::decode(bytes)?)
  }

  /// Applies the event count and string limits to an encoded frame.
  fn check_frame(&self, bytes: &[u8]) -> Result<()> {
    let mut count = 0;
    for field in the_wire::fields(bytes) {
      let field = field?;
      if field.tag == proto::INPUT_EVENTS && field.wire_type == WireType::LengthDelimited {
        count += 1;
        if count <= self.limits.max_events {
          self.check_event(field.value)?;
        }
      }
    }
    if count > self.limits.max_events {
      return Err(DecodeError::TooManyEvents {
        count,
        max: self.limits.max_events,
      });
    }
    Ok(())
  }

  fn check_event(&self, bytes: &[u8]) -> Result<()> {
    for field in the_wire::fields(bytes) {
      let field = field?;
      let Some(name) = proto::Event::string_field(field.tag) else {
        continue;
      };
      if field.wire_type == WireType::LengthDelimited
        && field.value.len() > self.limits.max_string_bytes
      {
        return Err(DecodeError::StringTooLong {
          field: name,
          len:   field.value.len(),
          max:   self.limits.max_string_bytes,
        });
      }
    }
    Ok(())
  }
}

/// Wire representation of a single model type.
///
/// Standalone `Key`, `PointerButton`, `Touch` and `Event` values fail with
/// [`DecodeError::Unset`] when their enum is unset, since there is no
/// enclosing frame to drop them from.
pub trait Codec: Sized {
  fn encode(&self) -> Vec<u8>;

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>>;

  fn decode(bytes: &[u8]) -> Result<Decoded<Self>> {
    Self::decode_with(&Decoder::default(), bytes)
  }
}

impl Codec for Point {
  fn encode(&self) -> Vec<u8> {
    proto::Pos2::from(*self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    let pb: proto::Pos2 = decoder.message(bytes)?;
    Ok(Decoded::clean(point(Some(&pb))))
  }
}

impl Codec for Rect {
  fn encode(&self) -> Vec<u8> {
    proto::Rect::from(*self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    let pb: proto::Rect = decoder.message(bytes)?;
    Ok(Decoded::clean(rect(Some(&pb))))
  }
}

impl Codec for Modifiers {
  fn encode(&self) -> Vec<u8> {
    proto::Modifiers::from(*self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    let pb: proto::Modifiers = decoder.message(bytes)?;
    Ok(Decoded::clean(modifiers(Some(&pb))))
  }
}

impl Codec for Key {
  fn encode(&self) -> Vec<u8> {
    proto::Key::from(self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    let pb: proto::Key = decoder.message(bytes)?;
    Ok(Decoded::clean(key(pb)?))
  }
}

impl Codec for PointerButton {
  fn encode(&self) -> Vec<u8> {
    proto::PointerButton::from(self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    let pb: proto::PointerButton = decoder.message(bytes)?;
    Ok(Decoded::clean(pointer_button(pb)?))
  }
}

impl Codec for Touch {
  fn encode(&self) -> Vec<u8> {
    proto::Touch::from(self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    let pb: proto::Touch = decoder.message(bytes)?;
    Ok(Decoded::clean(touch(pb)?))
  }
}

impl Codec for Event {
  fn encode(&self) -> Vec<u8> {
    proto::Event::from(self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    decoder.check_size(bytes)?;
    decoder.check_event(bytes)?;
    let pb = proto::Event::decode(bytes)?;
    let mut cx = Context::default();
    let event = cx.event(0, pb)?;
    Ok(Decoded {
      value:       event,
      diagnostics: cx.diagnostics,
    })
  }
}

impl Codec for Input {
  fn encode(&self) -> Vec<u8> {
    proto::Input::from(self).encode_to_vec()
  }

  fn decode_with(decoder: &Decoder, bytes: &[u8]) -> Result<Decoded<Self>> {
    decoder.decode(bytes)
  }
}

/// Collects diagnostics while converting the mirror into the model.
#[derive(Default)]
struct Context {
  diagnostics: Diagnostics,
}

impl Context {

  fn input(&mut self, pb: proto::Input) -> Result<Input> {
    let mut events = Vec::with_capacity(pb.events.len());
    for (index, event) in pb.events.into_iter().enumerate() {
      match self.event(index, event) {
        Ok(event) => events.push(event),
        Err(DecodeError::Unset { kind, value }) => {
          warn!(index, %kind, value, "dropping event with unset or unknown enum");
          self
            .diagnostics
            .push(Diagnostic::EventDropped { index, kind, value });
        },
        Err(err) => return Err(err),
      }
    }

    Ok(Input {
      screen_rect: rect(pb.screen_rect.as_ref()),
      pixels_per_point: pb.pixels_per_point,
      max_texture_side: pb.max_texture_side,
      time: pb.time,
      predicted_dt: pb.predicted_dt,
      events,
      has_focus: pb.has_focus,
      modifiers: modifiers(pb.modifier.as_ref()),
    })
  }

  fn event(&mut self, index: usize, pb: proto::Event) -> Result<Event> {
    let et = resolve(EnumKind::EventType, pb.et, EventType::from_wire)?;
    for field in pb.present_payloads() {
      if field != et.payload_field() {
        debug!(index, %et, field, "ignoring payload that does not match the event type");
        self.diagnostics.push(Diagnostic::StrayPayload {
          index,
          event: et,
          field,
        });
      }
    }

    Ok(match et {
      EventType::Copy => Event::Copy,
      EventType::Cut => Event::Cut,
      EventType::Paste => Event::Paste(pb.paste.unwrap_or_default()),
      EventType::Text => Event::Text(pb.text.unwrap_or_default()),
      EventType::Key => Event::Key(key(pb.key.unwrap_or_default())?),
      EventType::PointerMoved => Event::PointerMoved(point(pb.pointer_moved.as_ref())),
      EventType::PointerButton => {
        Event::PointerButton(pointer_button(pb.pointer_button.unwrap_or_default())?)
      },
      EventType::PointerGone => Event::PointerGone,
      EventType::Scroll => Event::Scroll(point(pb.scroll.as_ref())),
      EventType::Zoom => Event::Zoom(pb.zoom.unwrap_or_default()),
      EventType::CompositionStart => Event::CompositionStart,
      EventType::CompositionUpdate => {
        Event::CompositionUpdate(pb.composition_update.unwrap_or_default())
      },
      EventType::Touch => Event::Touch(touch(pb.touch.unwrap_or_default())?),
    })
  }
}

fn resolve<T>(kind: EnumKind, value: i32, from_wire: fn(i32) -> Option<T>) -> Result<T> {
  from_wire(value).ok_or(DecodeError::Unset { kind, value })
}

fn point(pb: Option<&proto::Pos2>) -> Point {
  pb.map(|pos| Point::new(pos.x, pos.y)).unwrap_or_default()
}

fn rect(pb: Option<&proto::Rect>) -> Rect {
  pb.map(|rect| Rect::new(point(rect.min.as_ref()), point(rect.max.as_ref())))
    .unwrap_or_default()
}

fn modifiers(pb: Option<&proto::Modifiers>) -> Modifiers {
  pb.map(|m| {
    Modifiers {
      alt:     m.alt,
      ctrl:    m.ctrl,
      shift:   m.shift,
      mac_cmd: m.mac_cmd,
      command: m.command,
    }
  })
  .unwrap_or_default()
}

fn key(pb: proto::Key) -> Result<Key> {
  Ok(Key {
    key:       resolve(EnumKind::KeyType, pb.key, KeyType::from_wire)?,
    pressed:   pb.pressed,
    modifiers: modifiers(pb.modifiers.as_ref()),
  })
}

fn pointer_button(pb: proto::PointerButton) -> Result<PointerButton> {
  Ok(PointerButton {
    pos:       point(pb.pos.as_ref()),
    button:    resolve(EnumKind::ButtonType, pb.button, ButtonType::from_wire)?,
    pressed:   pb.pressed,
    modifiers: modifiers(pb.modifiers.as_ref()),
  })
}

fn touch(pb: proto::Touch) -> Result<Touch> {
  Ok(Touch {
    device_id: pb.device_id,
    id:        pb.id,
    phase:     resolve(EnumKind::TouchPhase, pb.phase, TouchPhase::from_wire)?,
    pos:       point(pb.pos.as_ref()),
    force:     pb.force,
  })
}

impl From<Point> for proto::Pos2 {
  fn from(point: Point) -> Self {
    Self {
      x: point.x,
      y: point.y,
    }
  }
}

impl From<Rect> for proto::Rect {
  fn from(rect: Rect) -> Self {
    Self {
      min: Some(rect.min.into()),
      max: Some(rect.max.into()),
    }
  }
}

impl From<Modifiers> for proto::Modifiers {
  fn from(m: Modifiers) -> Self {
    Self {
      alt:     m.alt,
      ctrl:    m.ctrl,
      shift:   m.shift,
      mac_cmd: m.mac_cmd,
      command: m.command,
    }
  }
}

impl From<&Key> for proto::Key {
  fn from(key: &Key) -> Self {
    Self {
      key:       key.key.to_wire(),
      pressed:   key.pressed,
      modifiers: Some(key.modifiers.into()),
    }
  }
}

impl From<&PointerButton> for proto::PointerButton {
  fn from(button: &PointerButton) -> Self {
    Self {
      pos:       Some(button.pos.into()),
      button:    button.button.to_wire(),
      pressed:   button.pressed,
      modifiers: Some(button.modifiers.into()),
    }
  }
}

impl From<&Touch> for proto::Touch {
  fn from(touch: &Touch) -> Self {
    Self {
      device_id: touch.device_id,
      id:        touch.id,
      phase:     touch.phase.to_wire(),
      pos:       Some(touch.pos.into()),
      force:     touch.force,
    }
  }
}

impl From<&Event> for proto::Event {
  fn from(event: &Event) -> Self {
    let mut pb = proto::Event {
      et: event.event_type().to_wire(),
      ..proto::Event::default()
    };
    match event {
      Event::Copy => pb.copy = Some(true),
      Event::Cut => pb.cut = Some(true),
      Event::Paste(text) => pb.paste = Some(text.clone()),
      Event::Text(text) => pb.text = Some(text.clone()),
      Event::Key(key) => pb.key = Some(key.into()),
      Event::PointerMoved(pos) => pb.pointer_moved = Some((*pos).into()),
      Event::PointerButton(button) => pb.pointer_button = Some(button.into()),
      Event::PointerGone => pb.pointer_gone = Some(true),
      Event::Scroll(delta) => pb.scroll = Some((*delta).into()),
      Event::Zoom(factor) => pb.zoom = Some(*factor),
      Event::CompositionStart => pb.composition_start = Some(true),
      Event::CompositionUpdate(preedit) => pb.composition_update = Some(preedit.clone()),
      Event::Touch(touch) => pb.touch = Some(touch.into()),
    }
    pb
  }
}

impl From<&Input> for proto::Input {
  fn from(input: &Input) -> Self {
    Self {
      screen_rect:      Some(input.screen_rect.into()),
      pixels_per_point: input.pixels_per_point,
      max_texture_side: input.max_texture_side,
      time:             input.time,
      predicted_dt:     input.predicted_dt,
      events:           input.events.iter().map(proto::Event::from).collect(),
      has_focus:        input.has_focus,
      modifier:         Some(input.modifiers.into()),
    }
  }
}
