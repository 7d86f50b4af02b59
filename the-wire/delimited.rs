//! Varint length-prefixed framing for streams of messages.

use prost::encoding::{
  DecodeContext,
  WireType,
  decode_varint,
  encode_varint,
  encoded_len_varint,
  skip_field,
};

use crate::Result;

pub fn write_delimited(out: &mut Vec<u8>, message: &[u8]) {
  let len = message.len() as u64;
  out.reserve(encoded_len_varint(len) + message.len());
  encode_varint(len, out);
  out.extend_from_slice(message);
}

/// Iterates the messages of a delimited stream. Iteration ends after the
/// first structural error.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
  bytes:  &'a [u8],
  rest:   &'a [u8],
  failed: bool,
}

pub fn frames(bytes: &[u8]) -> Frames<'_> {
  Frames {
    bytes,
    rest: bytes,
    failed: false,
  }
}

impl<'a> Frames<'a> {
  /// Offset of the next frame's length prefix.
  pub fn offset(&self) -> usize {
    self.bytes.len() - self.rest.len()
  }

  fn read(&mut self) -> Result<&'a [u8]> {
    let start = self.rest;
    // A frame is laid out like a length-delimited field value.
    skip_field(WireType::LengthDelimited, 1, &mut self.rest, DecodeContext::default())?;
    let mut frame = &start[..start.len() - self.rest.len()];
    decode_varint(&mut frame)?;
    Ok(frame)
  }
}

impl<'a> Iterator for Frames<'a> {
  type Item = Result<&'a [u8]>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.rest.is_empty() {
      return None;
    }
    let frame = self.read();
    self.failed = frame.is_err();
    Some(frame)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn splits_frames_in_order() {
    let mut stream = Vec::new();
    write_delimited(&mut stream, b"one");
    write_delimited(&mut stream, b"");
    write_delimited(&mut stream, &[7u8; 200]);

    let collected = frames(&stream).collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(collected.len(), 3);
    assert_eq!(collected[0], b"one");
    assert!(collected[1].is_empty());
    assert_eq!(collected[2].len(), 200);
  }

  #[test]
  fn truncated_frame_ends_iteration() {
    let mut stream = Vec::new();
    write_delimited(&mut stream, b"whole");
    stream.extend_from_slice(&[0x09, b'x']);

    let mut iter = frames(&stream);
    assert_eq!(iter.next(), Some(Ok(&b"whole"[..])));
    assert_eq!(iter.offset(), 6);
    assert!(matches!(iter.next(), Some(Err(_))));
    assert_eq!(iter.next(), None);
  }

  quickcheck::quickcheck! {
    fn frames_come_back_unchanged(messages: Vec<Vec<u8>>) -> bool {
      let mut stream = Vec::new();
      for message in &messages {
        write_delimited(&mut stream, message);
      }
      frames(&stream)
        .collect::<Result<Vec<_>>>()
        .is_ok_and(|split| split == messages)
    }
  }
}
