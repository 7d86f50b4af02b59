//! Borrowed byte views handed across a C ABI by a host runtime.

use std::{
  ptr,
  slice,
};

use crate::{
  Decoded,
  Decoder,
  Input,
  codec::Result,
};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawBuffer {
  pub data: *const u8,
  pub len:  usize,
}

impl RawBuffer {
  pub const fn empty() -> Self {
    Self {
      data: ptr::null(),
      len:  0,
    }
  }

  pub fn from_slice(bytes: &[u8]) -> Self {
    Self {
      data: bytes.as_ptr(),
      len:  bytes.len(),
    }
  }

  /// A null pointer or zero length is an empty slice.
  ///
  /// # Safety
  ///
  /// A non-null `data` must point to `len` initialized bytes that stay
  /// valid and unmodified for `'a`.
  pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
    if self.data.is_null() || self.len == 0 {
      return &[];
    }
    unsafe { slice::from_raw_parts(self.data, self.len) }
  }
}

impl Decoder {
  /// # Safety
  ///
  /// Same contract as [`RawBuffer::as_bytes`] for the duration of the call.
  pub unsafe fn decode_raw(&self, buffer: RawBuffer) -> Result<Decoded<Input>> {
    self.decode(unsafe { buffer.as_bytes() })
  }
}
