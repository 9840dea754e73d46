#![no_main]
use libfuzzer_sys::fuzz_target;
use zx5::{compress, decompress, CompressOptions, Format};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // first byte picks the variant and a skip, the rest is the input
    let (selector, input) = (data[0], &data[1..]);
    if input.is_empty() {
        return;
    }
    let format = match selector % 3 {
        0 => Format::STANDARD,
        1 => Format::CLASSIC,
        _ => Format::BACKWARDS,
    };
    let skip = (selector as usize / 3) % input.len();
    let options = CompressOptions {
        skip,
        format,
        ..CompressOptions::default()
    };

    let compressed = compress(input, &options).expect("compression of non-empty input failed");
    let recovered = decompress(&compressed.data, &input[..skip], format)
        .expect("decompression of a fresh stream failed");
    assert_eq!(
        recovered,
        &input[skip..],
        "round-trip mismatch: {} bytes (skip {}) compressed to {}",
        input.len(),
        skip,
        compressed.len()
    );
});
