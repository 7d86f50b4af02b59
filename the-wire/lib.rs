//! Raw wire views that `prost` does not provide.
//!
//! `prost` owns encoding and decoding of messages. This crate adds the
//! pieces that work on bytes before a message is materialized: splitting
//! a length-delimited frame stream, and walking the fields of a message
//! without allocating so limits can be checked up front.

pub mod delimited;
pub mod fields;

pub use delimited::{
  Frames,
  frames,
  write_delimited,
};
pub use fields::{
  Field,
  Fields,
  fields,
};
pub use prost::{
  DecodeError,
  encoding::WireType,
};

pub type Result<T> = std::result::Result<T, DecodeError>;
