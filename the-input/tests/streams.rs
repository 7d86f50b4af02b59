use quickcheck::{
  Arbitrary,
  Gen,
};
use the_input::{
  ButtonType,
  Codec,
  DecodeLimits,
  Decoder,
  Event,
  Input,
  InputSession,
  Key,
  KeyType,
  Modifiers,
  Point,
  PointerButton,
  Rect,
  Touch,
  TouchPhase,
  TouchViolation,
  Violation,
  decode,
  encode,
};
use the_wire::{
  frames,
  write_delimited,
};

// Quarter steps keep generated floats exact and free of NaN.
fn float(g: &mut Gen) -> f32 {
  f32::from(i16::arbitrary(g)) / 4.0
}

fn point(g: &mut Gen) -> Point {
  Point::new(float(g), float(g))
}

fn modifiers(g: &mut Gen) -> Modifiers {
  Modifiers {
    alt:     bool::arbitrary(g),
    ctrl:    bool::arbitrary(g),
    shift:   bool::arbitrary(g),
    mac_cmd: bool::arbitrary(g),
    command: bool::arbitrary(g),
  }
}

fn rect(g: &mut Gen) -> Rect {
  Rect::new(point(g), point(g))
}

fn key(g: &mut Gen) -> Key {
  Key {
    key:       *g.choose(KeyType::ALL).unwrap_or(&KeyType::A),
    pressed:   bool::arbitrary(g),
    modifiers: modifiers(g),
  }
}

fn pointer_button(g: &mut Gen) -> PointerButton {
  let button = *g
    .choose(&[
      ButtonType::Primary,
      ButtonType::Secondary,
      ButtonType::Middle,
      ButtonType::Extra1,
      ButtonType::Extra2,
    ])
    .unwrap_or(&ButtonType::Primary);
  PointerButton::new(point(g), button, bool::arbitrary(g), modifiers(g))
}

fn contact(g: &mut Gen) -> Touch {
  let phase = *g
    .choose(&[
      TouchPhase::Start,
      TouchPhase::Move,
      TouchPhase::End,
      TouchPhase::Cancel,
    ])
    .unwrap_or(&TouchPhase::Start);
  Touch {
    device_id: u64::arbitrary(g),
    id: u64::arbitrary(g),
    phase,
    pos: point(g),
    force: float(g),
  }
}

fn event(g: &mut Gen) -> Event {
  match u8::arbitrary(g) % 13 {
    0 => Event::Copy,
    1 => Event::Cut,
    2 => Event::Paste(String::arbitrary(g)),
    3 => Event::Text(String::arbitrary(g)),
    4 => Event::Key(key(g)),
    5 => Event::PointerMoved(point(g)),
    6 => Event::PointerButton(pointer_button(g)),
    7 => Event::PointerGone,
    8 => Event::Scroll(point(g)),
    9 => Event::Zoom(float(g)),
    10 => Event::CompositionStart,
    11 => Event::CompositionUpdate(String::arbitrary(g)),
    _ => Event::Touch(contact(g)),
  }
}

/// A single generated value of one model type.
#[derive(Debug, Clone)]
struct Any<T>(T);

macro_rules! any {
  ($($ty:ty => $generate:expr,)*) => {
    $(
      impl Arbitrary for Any<$ty> {
        fn arbitrary(g: &mut Gen) -> Self {
          Any($generate(g))
        }
      }
    )*
  };
}

any! {
  Point => point,
  Rect => rect,
  Modifiers => modifiers,
  Key => key,
  PointerButton => pointer_button,
  Touch => contact,
  Event => event,
}

#[derive(Debug, Clone)]
struct AnyInput(Input);

impl Arbitrary for AnyInput {
  fn arbitrary(g: &mut Gen) -> Self {
    let count = usize::arbitrary(g) % 16;
    AnyInput(Input {
      screen_rect:      Rect::new(point(g), point(g)),
      pixels_per_point: float(g),
      max_texture_side: u32::arbitrary(g),
      time:             f64::from(i32::arbitrary(g)) / 8.0,
      predicted_dt:     float(g),
      events:           (0..count).map(|_| event(g)).collect(),
      has_focus:        bool::arbitrary(g),
      modifiers:        modifiers(g),
    })
  }
}

fn unvalidated() -> Decoder {
  Decoder::new(DecodeLimits {
    validate: false,
    ..DecodeLimits::default()
  })
}

/// Decodes `value`'s own encoding on its own, outside any frame.
fn round_trips<T: Codec + PartialEq>(value: &T) -> bool {
  T::decode_with(&unvalidated(), &value.encode())
    .is_ok_and(|decoded| decoded.is_clean() && decoded.value == *value)
}

quickcheck::quickcheck! {
  fn point_round_trips(point: Any<Point>) -> bool {
    round_trips(&point.0)
  }

  fn rect_round_trips(rect: Any<Rect>) -> bool {
    round_trips(&rect.0)
  }

  fn modifiers_round_trip(modifiers: Any<Modifiers>) -> bool {
    round_trips(&modifiers.0)
  }

  fn key_round_trips(key: Any<Key>) -> bool {
    round_trips(&key.0)
  }

  fn pointer_button_round_trips(button: Any<PointerButton>) -> bool {
    round_trips(&button.0)
  }

  fn touch_round_trips(touch: Any<Touch>) -> bool {
    round_trips(&touch.0)
  }

  fn event_round_trips(event: Any<Event>) -> bool {
    round_trips(&event.0)
  }

  fn any_frame_round_trips(input: AnyInput) -> bool {
    let decoded = unvalidated().decode(&encode(&input.0)).unwrap();
    decoded.is_clean() && decoded.value == input.0
  }

  fn encoding_is_canonical(input: AnyInput) -> bool {
    let bytes = encode(&input.0);
    let decoded = unvalidated().decode(&bytes).unwrap();
    encode(&decoded.value) == bytes
  }

  fn arbitrary_bytes_never_panic(bytes: Vec<u8>) -> bool {
    let _ = decode(&bytes);
    let _ = Event::decode(&bytes);
    true
  }
}

fn touch(phase: TouchPhase) -> Event {
  Event::Touch(Touch {
    device_id: 1,
    id: 7,
    phase,
    pos: Point::new(1.0, 1.0),
    force: 0.0,
  })
}

fn frame(time: f64, events: impl IntoIterator<Item = Event>) -> Input {
  let mut input = Input::new(Rect::from_min_size(Point::ZERO, 320.0, 240.0), 1.0).with_time(time);
  input.events.extend(events);
  input
}

fn record(frames: &[Input]) -> Vec<u8> {
  let mut stream = Vec::new();
  for input in frames {
    write_delimited(&mut stream, &encode(input));
  }
  stream
}

fn replay(stream: &[u8]) -> Vec<the_input::SessionReport> {
  let mut session = InputSession::new();
  frames(stream)
    .map(|bytes| {
      let decoded = decode(bytes.unwrap()).unwrap();
      session.accept(&decoded.value)
    })
    .collect()
}

#[test]
fn recorded_touch_lifecycle_is_valid() {
  let stream = record(&[
    frame(0.0, [touch(TouchPhase::Start)]),
    frame(0.1, [touch(TouchPhase::Move), touch(TouchPhase::Move)]),
    frame(0.2, [touch(TouchPhase::End)]),
  ]);

  let reports = replay(&stream);
  assert_eq!(reports.len(), 3);
  assert!(reports.iter().all(|report| report.is_clean()));
}

#[test]
fn move_before_start_is_flagged_by_the_session() {
  let stream = record(&[frame(0.0, [touch(TouchPhase::Move)])]);
  let reports = replay(&stream);
  assert_eq!(reports[0].violations.len(), 1);
  match &reports[0].violations[0] {
    Violation::Touch {
      index: 0,
      violation: TouchViolation::NotStarted { id, phase },
    } => {
      assert_eq!((id.device_id, id.id), (1, 7));
      assert_eq!(*phase, TouchPhase::Move);
    },
    other => panic!("unexpected violation {other:?}"),
  }
}

#[test]
fn reappearance_after_end_needs_a_new_start() {
  let stream = record(&[
    frame(0.0, [touch(TouchPhase::Start), touch(TouchPhase::End)]),
    frame(0.1, [touch(TouchPhase::Move)]),
  ]);
  let reports = replay(&stream);
  assert!(reports[0].is_clean());
  assert!(!reports[1].is_clean());
}

#[test]
fn composition_spans_frames_and_commits_on_text() {
  let stream = record(&[
    frame(0.0, [Event::CompositionStart]),
    frame(0.1, [Event::CompositionUpdate("ka".into())]),
    frame(0.2, [
      Event::CompositionUpdate("かん".into()),
      Event::Text("漢".into()),
    ]),
  ]);
  let reports = replay(&stream);
  assert!(reports.iter().all(|report| report.is_clean()));
  assert_eq!(reports[2].commits.as_slice(), ["漢".to_string()]);
}
