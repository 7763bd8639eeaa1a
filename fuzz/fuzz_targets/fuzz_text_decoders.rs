#![no_main]

use libfuzzer_sys::fuzz_target;

use hydrotrace::formats::{KorsarDecoder, TrapCsvDecoder};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = KorsarDecoder::new().parse_str(text);
    let _ = TrapCsvDecoder::new().parse_str(text);
});
