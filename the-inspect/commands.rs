use std::{
  fs,
  io::{
    self,
    Read,
    Write,
  },
  path::Path,
};

use anyhow::{
  Context,
  Result,
  bail,
};
use serde::Deserialize;
use the_input::{
  Decoder,
  Input,
  InputSession,
};

pub fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
  match file {
    Some(path) => fs::read(path).with_context(|| format!("failed to read {}", path.display())),
    None => {
      let mut bytes = Vec::new();
      io::stdin()
        .read_to_end(&mut bytes)
        .context("failed to read stdin")?;
      Ok(bytes)
    },
  }
}

pub fn decode(decoder: &Decoder, bytes: &[u8], json: bool, out: &mut impl Write) -> Result<()> {
  let decoded = decoder.decode(bytes).context("frame rejected")?;
  if json {
    serde_json::to_writer_pretty(&mut *out, &decoded.value)?;
    writeln!(out)?;
  } else {
    writeln!(out, "{:#?}", decoded.value)?;
  }
  for diagnostic in &decoded.diagnostics {
    writeln!(out, "diagnostic: {diagnostic}")?;
  }
  Ok(())
}

/// Totals printed after a replayed stream.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StreamSummary {
  pub frames:      u64,
  pub events:      usize,
  pub diagnostics: usize,
  pub violations:  usize,
}

pub fn stream(decoder: &Decoder, bytes: &[u8], out: &mut impl Write) -> Result<StreamSummary> {
  let mut session = InputSession::new();
  let mut summary = StreamSummary::default();
  let mut frames = the_wire::frames(bytes);

  loop {
    let offset = frames.offset();
    let Some(frame) = frames.next() else {
      break;
    };
    let frame = frame.with_context(|| format!("bad length prefix at byte {offset}"))?;
    let decoded = decoder
      .decode(frame)
      .with_context(|| format!("frame {} at byte {offset} rejected", summary.frames))?;
    let report = session.accept(&decoded.value);

    writeln!(
      out,
      "frame {}: t={} events={}",
      report.frame,
      decoded.value.time,
      decoded.value.events.len()
    )?;
    for diagnostic in &decoded.diagnostics {
      writeln!(out, "  diagnostic: {diagnostic}")?;
    }
    for violation in &report.violations {
      writeln!(out, "  violation: {violation}")?;
    }
    for commit in &report.commits {
      writeln!(out, "  commit: {commit:?}")?;
    }

    summary.frames += 1;
    summary.events += decoded.value.events.len();
    summary.diagnostics += decoded.diagnostics.len();
    summary.violations += report.violations.len();
  }

  writeln!(
    out,
    "{} frames, {} events, {} diagnostics, {} violations",
    summary.frames, summary.events, summary.diagnostics, summary.violations
  )?;
  Ok(summary)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonFrames {
  Many(Vec<Input>),
  One(Box<Input>),
}

pub fn encode(json: &[u8], delimited: bool, out: &mut impl Write) -> Result<()> {
  let frames: JsonFrames = serde_json::from_slice(json).context("invalid JSON frame")?;
  let bytes = match frames {
    JsonFrames::One(input) if !delimited => the_input::encode(&input),
    JsonFrames::One(input) => {
      let mut bytes = Vec::new();
      the_wire::write_delimited(&mut bytes, &the_input::encode(&input));
      bytes
    },
    JsonFrames::Many(inputs) => {
      if inputs.is_empty() {
        bail!("no frames to encode");
      }
      let mut bytes = Vec::new();
      for input in &inputs {
        the_wire::write_delimited(&mut bytes, &the_input::encode(input));
      }
      bytes
    },
  };
  out.write_all(&bytes)?;
  Ok(())
}

#[cfg(test)]
mod test {
  use the_input::{
    DecodeLimits,
    Event,
    Point,
    Rect,
    Touch,
    TouchPhase,
  };

  use super::*;

  fn frame(time: f64, event: Event) -> Input {
    Input::new(Rect::from_min_size(Point::ZERO, 64.0, 64.0), 1.0)
      .with_time(time)
      .with_event(event)
  }

  fn touch(phase: TouchPhase) -> Event {
    Event::Touch(Touch {
      device_id: 0,
      id: 2,
      phase,
      pos: Point::new(3.0, 3.0),
      force: 0.0,
    })
  }

  #[test]
  fn encoded_json_array_replays_as_a_stream() {
    let inputs = vec![
      frame(0.0, touch(TouchPhase::Start)),
      frame(0.1, touch(TouchPhase::End)),
      frame(0.2, touch(TouchPhase::Move)),
    ];
    let json = serde_json::to_vec(&inputs).unwrap();

    let mut bytes = Vec::new();
    encode(&json, false, &mut bytes).unwrap();

    let mut out = Vec::new();
    let summary = stream(&Decoder::default(), &bytes, &mut out).unwrap();
    assert_eq!(summary, StreamSummary {
      frames:      3,
      events:      3,
      diagnostics: 0,
      violations:  1,
    });

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("frame 2: t=0.2 events=1"));
    assert!(text.contains("violation: event 0: touch 0:2"));
  }

  #[test]
  fn truncated_stream_is_an_error() {
    let mut bytes = Vec::new();
    encode(
      &serde_json::to_vec(&frame(0.0, Event::Copy)).unwrap(),
      true,
      &mut bytes,
    )
    .unwrap();
    bytes.push(0x20);

    let mut out = Vec::new();
    let err = stream(&Decoder::default(), &bytes, &mut out).unwrap_err();
    assert!(err.to_string().contains("bad length prefix"), "{err:#}");
  }

  #[test]
  fn decode_prints_json() {
    let bytes = the_input::encode(&frame(1.0, Event::Text("hi".into())));
    let mut out = Vec::new();
    decode(&Decoder::default(), &bytes, true, &mut out).unwrap();
    let printed: Input = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed.events, [Event::Text("hi".into())]);
  }

  #[test]
  fn decode_respects_configured_limits() {
    let decoder = Decoder::new(DecodeLimits {
      max_events: 0,
      ..DecodeLimits::default()
    });
    let bytes = the_input::encode(&frame(1.0, Event::Cut));
    assert!(decode(&decoder, &bytes, false, &mut Vec::new()).is_err());
  }

  #[test]
  fn reads_frames_from_a_file() {
    let bytes = the_input::encode(&frame(0.5, Event::PointerGone));
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    assert_eq!(read_input(Some(file.path())).unwrap(), bytes);
  }
}
