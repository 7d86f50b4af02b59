#![no_main]

use libfuzzer_sys::fuzz_target;
use the_input::{
  Decoder,
  InputSession,
};

fuzz_target!(|data: &[u8]| {
  let decoder = Decoder::default();
  let mut session = InputSession::new();
  for frame in the_wire::frames(data) {
    let Ok(frame) = frame else {
      break;
    };
    if let Ok(decoded) = decoder.decode(frame) {
      let report = session.accept(&decoded.value);
      assert_eq!(report.frame + 1, session.frames());
    }
  }
});
