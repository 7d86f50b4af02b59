use prost::encoding::{
  DecodeContext,
  WireType,
  decode_key,
  decode_varint,
  skip_field,
};

use crate::Result;

/// One field of a message, borrowed from the encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
  pub tag:       u32,
  pub wire_type: WireType,
  /// The encoded value. Length-delimited values exclude their length
  /// prefix; groups include everything up to and including the end key.
  pub value:     &'a [u8],
}

/// Iterates the top-level fields of one message without decoding them.
/// Iteration ends after the first structural error.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
  rest:   &'a [u8],
  failed: bool,
}

pub fn fields(bytes: &[u8]) -> Fields<'_> {
  Fields {
    rest:   bytes,
    failed: false,
  }
}

impl<'a> Fields<'a> {
  fn read(&mut self) -> Result<Field<'a>> {
    let (tag, wire_type) = decode_key(&mut self.rest)?;
    let start = self.rest;
    skip_field(wire_type, tag, &mut self.rest, DecodeContext::default())?;
    let mut value = &start[..start.len() - self.rest.len()];
    if wire_type == WireType::LengthDelimited {
      decode_varint(&mut value)?;
    }
    Ok(Field {
      tag,
      wire_type,
      value,
    })
  }
}

impl<'a> Iterator for Fields<'a> {
  type Item = Result<Field<'a>>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.rest.is_empty() {
      return None;
    }
    let field = self.read();
    self.failed = field.is_err();
    Some(field)
  }
}
