#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use hydrotrace::formats::LentDecoder;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail with an error, never panic.
    if let Ok(table) = LentDecoder::new().decode_reader(Cursor::new(data)) {
        // A decoded table is always rectangular.
        let rows = table.row_count();
        assert!(table.columns().iter().all(|column| column.len() == rows));
    }
});
