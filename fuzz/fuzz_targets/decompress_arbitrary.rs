#![no_main]
use libfuzzer_sys::fuzz_target;
use zx5::{decompress_bounded, Format};

fuzz_target!(|data: &[u8]| {
    // arbitrary bytes must never panic, only fail cleanly
    for format in [Format::STANDARD, Format::CLASSIC, Format::BACKWARDS] {
        let _ = decompress_bounded(data, &[], format, 1 << 20);
    }
});
