//! The wire schema, declared with `prost`.
//!
//! These structs exist only to move bytes in and out; the rest of the
//! crate works with the typed model. Enum fields are declared `int32`,
//! which shares the enum varint encoding, so unknown values reach the
//! conversion step intact. `Event` payloads are proto3 `optional` so
//! presence on the wire is visible even for zero values.

use prost::Message;

pub(crate) const INPUT_EVENTS: u32 = 6;
pub(crate) const EVENT_PASTE: u32 = 4;
pub(crate) const EVENT_TEXT: u32 = 5;
pub(crate) const EVENT_COMPOSITION_UPDATE: u32 = 13;

#[derive(Clone, Copy, PartialEq, Message)]
pub(crate) struct Pos2 {
  #[prost(float, tag = "1")]
  pub x: f32,
  #[prost(float, tag = "2")]
  pub y: f32,
}

#[derive(Clone, Copy, PartialEq, Message)]
pub(crate) struct Rect {
  #[prost(message, optional, tag = "1")]
  pub min: Option<Pos2>,
  #[prost(message, optional, tag = "2")]
  pub max: Option<Pos2>,
}

#[derive(Clone, Copy, PartialEq, Message)]
pub(crate) struct Modifiers {
  #[prost(bool, tag = "1")]
  pub alt:     bool,
  #[prost(bool, tag = "2")]
  pub ctrl:    bool,
  #[prost(bool, tag = "3")]
  pub shift:   bool,
  #[prost(bool, tag = "4")]
  pub mac_cmd: bool,
  #[prost(bool, tag = "5")]
  pub command: bool,
}

#[derive(Clone, Copy, PartialEq, Message)]
pub(crate) struct Key {
  #[prost(int32, tag = "1")]
  pub key:       i32,
  #[prost(bool, tag = "2")]
  pub pressed:   bool,
  #[prost(message, optional, tag = "3")]
  pub modifiers: Option<Modifiers>,
}

#[derive(Clone, Copy, PartialEq, Message)]
pub(crate) struct PointerButton {
  #[prost(message, optional, tag = "1")]
  pub pos:       Option<Pos2>,
  #[prost(int32, tag = "2")]
  pub button:    i32,
  #[prost(bool, tag = "3")]
  pub pressed:   bool,
  #[prost(message, optional, tag = "4")]
  pub modifiers: Option<Modifiers>,
}

#[derive(Clone, Copy, PartialEq, Message)]
pub(crate) struct Touch {
  #[prost(uint64, tag = "1")]
  pub device_id: u64,
  #[prost(uint64, tag = "2")]
  pub id:        u64,
  #[prost(int32, tag = "3")]
  pub phase:     i32,
  #[prost(message, optional, tag = "4")]
  pub pos:       Option<Pos2>,
  #[prost(float, tag = "5")]
  pub force:     f32,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct Event {
  #[prost(int32, tag = "1")]
  pub et:                 i32,
  #[prost(bool, optional, tag = "2")]
  pub copy:               Option<bool>,
  #[prost(bool, optional, tag = "3")]
  pub cut:                Option<bool>,
  #[prost(string, optional, tag = "4")]
  pub paste:              Option<String>,
  #[prost(string, optional, tag = "5")]
  pub text:               Option<String>,
  #[prost(message, optional, tag = "6")]
  pub key:                Option<Key>,
  #[prost(message, optional, tag = "7")]
  pub pointer_moved:      Option<Pos2>,
  #[prost(message, optional, tag = "8")]
  pub pointer_button:     Option<PointerButton>,
  #[prost(bool, optional, tag = "9")]
  pub pointer_gone:       Option<bool>,
  #[prost(message, optional, tag = "10")]
  pub scroll:             Option<Pos2>,
  #[prost(float, optional, tag = "11")]
  pub zoom:               Option<f32>,
  #[prost(bool, optional, tag = "12")]
  pub composition_start:  Option<bool>,
  #[prost(string, optional, tag = "13")]
  pub composition_update: Option<String>,
  #[prost(message, optional, tag = "14")]
  pub touch:              Option<Touch>,
}

impl Event {
  /// Payload fields that appeared on the wire, by field name.
  pub fn present_payloads(&self) -> impl Iterator<Item = &'static str> {
    [
      ("copy", self.copy.is_some()),
      ("cut", self.cut.is_some()),
      ("paste", self.paste.is_some()),
      ("text", self.text.is_some()),
      ("key", self.key.is_some()),
      ("pointer_moved", self.pointer_moved.is_some()),
      ("pointer_button", self.pointer_button.is_some()),
      ("pointer_gone", self.pointer_gone.is_some()),
      ("scroll", self.scroll.is_some()),
      ("zoom", self.zoom.is_some()),
      ("composition_start", self.composition_start.is_some()),
      ("composition_update", self.composition_update.is_some()),
      ("touch", self.touch.is_some()),
    ]
    .into_iter()
    .filter_map(|(field, present)| present.then_some(field))
  }

  /// Name of a string payload field, for limit errors.
  pub fn string_field(tag: u32) -> Option<&'static str> {
    match tag {
      EVENT_PASTE => Some("paste"),
      EVENT_TEXT => Some("text"),
      EVENT_COMPOSITION_UPDATE => Some("composition_update"),
      _ => None,
    }
  }
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct Input {
  #[prost(message, optional, tag = "1")]
  pub screen_rect:      Option<Rect>,
  #[prost(float, tag = "2")]
  pub pixels_per_point: f32,
  #[prost(uint32, tag = "3")]
  pub max_texture_side: u32,
  #[prost(double, tag = "4")]
  pub time:             f64,
  #[prost(float, tag = "5")]
  pub predicted_dt:     f32,
  #[prost(message, repeated, tag = "6")]
  pub events:           Vec<Event>,
  #[prost(bool, tag = "7")]
  pub has_focus:        bool,
  #[prost(message, optional, tag = "8")]
  pub modifier:         Option<Modifiers>,
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn pos2_layout() {
    let pos = Pos2 { x: 1.0, y: 0.0 };
    assert_eq!(pos.encode_to_vec(), [0x0d, 0x00, 0x00, 0x80, 0x3f]);
  }

  #[test]
  fn event_presence_is_tracked() {
    let sent = Event {
      et: 5,
      text: Some(String::new()),
      key: Some(Key::default()),
      ..Event::default()
    };
    let event = Event::decode(sent.encode_to_vec().as_slice()).unwrap();
    assert_eq!(event.et, 5);
    assert_eq!(event.text.as_deref(), Some(""));
    assert_eq!(event.present_payloads().collect::<Vec<_>>(), ["text", "key"]);
  }

  #[test]
  fn repeated_events_keep_wire_order() {
    let input = Input {
      events: (1..=3)
        .map(|et| {
          Event {
            et,
            ..Event::default()
          }
        })
        .collect(),
      ..Input::default()
    };
    let decoded = Input::decode(input.encode_to_vec().as_slice()).unwrap();
    let tags = decoded.events.iter().map(|event| event.et).collect::<Vec<_>>();
    assert_eq!(tags, [1, 2, 3]);
  }

  #[test]
  fn repeated_embedded_messages_merge() {
    let mut bytes = Key {
      key:       26,
      pressed:   false,
      modifiers: Some(Modifiers {
        ctrl: true,
        ..Modifiers::default()
      }),
    }
    .encode_to_vec();
    bytes.extend(
      Key {
        key:       0,
        pressed:   true,
        modifiers: Some(Modifiers {
          shift: true,
          ..Modifiers::default()
        }),
      }
      .encode_to_vec(),
    );

    let key = Key::decode(bytes.as_slice()).unwrap();
    assert_eq!(key.key, 26);
    assert!(key.pressed);
    let modifiers = key.modifiers.unwrap();
    assert!(modifiers.ctrl && modifiers.shift);
  }
}
