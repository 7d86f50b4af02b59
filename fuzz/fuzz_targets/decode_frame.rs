#![no_main]

use libfuzzer_sys::fuzz_target;
use the_input::{
  DecodeLimits,
  Decoder,
  encode,
};

fuzz_target!(|data: &[u8]| {
  let decoder = Decoder::new(DecodeLimits {
    validate: false,
    ..DecodeLimits::default()
  });
  let Ok(decoded) = decoder.decode(data) else {
    return;
  };

  let bytes = encode(&decoded.value);
  let again = decoder
    .decode(&bytes)
    .expect("re-encoded frame must decode");
  assert!(again.is_clean(), "re-encoded frame has diagnostics");

  // NaN payloads compare unequal, so compare canonical bytes instead.
  assert_eq!(encode(&again.value), bytes);
});
