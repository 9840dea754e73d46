//! E2E Test Suite: round trips through the public API
//!
//! Runs a small corpus of asset-like buffers through every entry point a
//! host uses:
//! - `compress` / `decompress` (one-shot core API)
//! - `optimize` + `encode` with a reused arena
//! - `io::compress_buffer` / `io::decompress_buffer` (host layer: backwards
//!   reversal, dictionaries)
//!
//! Every case checks that the decoder reproduces the input exactly and that
//! the stream length agrees with the cost the optimizer computed.

extern crate zx5;

use zx5::config::{MAX_OFFSET, MAX_OFFSET_QUICK};
use zx5::encode::output_size;
use zx5::io::{compress_buffer, decompress_buffer, Prefs};
use zx5::{compress, decompress, encode, optimize, optimize_in, Arena, CompressOptions, Format};

const FORMATS: [Format; 3] = [Format::STANDARD, Format::CLASSIC, Format::BACKWARDS];

fn xorshift(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed >> 8) as u8
        })
        .collect()
}

/// Buffers shaped like the data these streams usually carry.
fn corpus() -> Vec<(&'static str, Vec<u8>)> {
    let mut tiles = Vec::new();
    for y in 0..24u8 {
        for x in 0..32u8 {
            tiles.push(if (x ^ y) & 4 == 0 { 0x11 } else { 0x2F });
        }
    }

    let mut screen = vec![0u8; 768];
    for (i, b) in screen.iter_mut().enumerate() {
        if i % 64 < 40 {
            *b = (i % 64) as u8 / 5 + (i / 64) as u8 * 3;
        }
    }

    let mut text = Vec::new();
    for i in 0..30 {
        text.extend_from_slice(format!("You enter room {}. Exits are north and south.\n", i % 9).as_bytes());
    }

    let mut mixed = xorshift(700, 1);
    let head = mixed[..300].to_vec();
    mixed.extend_from_slice(&head);
    mixed.extend_from_slice(&xorshift(200, 2));
    mixed.extend_from_slice(&head[100..250]);

    vec![
        ("one_byte", vec![0x42]),
        ("two_equal", vec![9, 9]),
        ("zeros", vec![0; 400]),
        ("ramp", (0..=255u8).cycle().take(1500).collect()),
        ("tiles", tiles),
        ("screen", screen),
        ("text", text),
        ("noise", xorshift(1024, 77)),
        ("mixed", mixed),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: one-shot API, all formats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_one_shot_roundtrip_corpus() {
    for (name, data) in corpus() {
        for format in FORMATS {
            let options = CompressOptions {
                format,
                ..CompressOptions::default()
            };
            let packed = compress(&data, &options)
                .unwrap_or_else(|e| panic!("{name}: compression failed: {e}"));
            let out = decompress(&packed.data, &[], format)
                .unwrap_or_else(|e| panic!("{name}: decompression failed: {e}"));
            assert_eq!(out, data, "{name} {:?}", format);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: stream size equals optimizer cost
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stream_size_matches_cost() {
    for (name, data) in corpus() {
        let mut chain = optimize(&data, 0, MAX_OFFSET).unwrap();
        let expected = output_size(chain.total_bits());
        let packed = encode(&mut chain, &data, 0, Format::STANDARD).unwrap();
        assert_eq!(packed.len(), expected, "{name}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: arena reuse across jobs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_arena_reuse_gives_identical_output() {
    let mut arena = Arena::new();
    for (name, data) in corpus() {
        let mut chain = optimize_in(arena, &data, 0, MAX_OFFSET).unwrap();
        let reused = encode(&mut chain, &data, 0, Format::STANDARD).unwrap();
        arena = chain.into_arena();

        let fresh = compress(&data, &CompressOptions::default()).unwrap();
        assert_eq!(reused, fresh, "{name}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: skip and window limits
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_skip_roundtrip_corpus() {
    for (name, data) in corpus() {
        if data.len() < 4 {
            continue;
        }
        let skip = data.len() / 3;
        for format in FORMATS {
            let options = CompressOptions {
                skip,
                format,
                ..CompressOptions::default()
            };
            let packed = compress(&data, &options).unwrap();
            let out = decompress(&packed.data, &data[..skip], format).unwrap();
            assert_eq!(out, &data[skip..], "{name} {:?}", format);
        }
    }
}

#[test]
fn test_quick_window_never_beats_full_window() {
    for (name, data) in corpus() {
        let full = compress(&data, &CompressOptions::default()).unwrap();
        let quick = compress(
            &data,
            &CompressOptions {
                offset_limit: MAX_OFFSET_QUICK,
                ..CompressOptions::default()
            },
        )
        .unwrap();
        assert!(full.len() <= quick.len(), "{name}");
        assert_eq!(decompress(&quick.data, &[], Format::STANDARD).unwrap(), data);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: host layer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_host_backwards_roundtrip() {
    let prefs = Prefs {
        backwards: true,
        ..Prefs::default()
    };
    for (name, data) in corpus() {
        let packed = compress_buffer(&data, &prefs).unwrap();
        assert_eq!(decompress_buffer(&packed.data, &prefs).unwrap(), data, "{name}");
    }
}

#[test]
fn test_host_dictionary_roundtrip() {
    let corpus = corpus();
    let dictionary = corpus
        .iter()
        .find(|(name, _)| *name == "text")
        .map(|(_, data)| data[..200].to_vec())
        .unwrap();

    for backwards in [false, true] {
        let prefs = Prefs {
            backwards,
            dictionary: Some(dictionary.clone()),
            ..Prefs::default()
        };
        for (name, data) in &corpus {
            let packed = compress_buffer(data, &prefs).unwrap();
            let out = decompress_buffer(&packed.data, &prefs).unwrap();
            assert_eq!(&out, data, "{name} backwards={backwards}");
        }
    }
}

#[test]
fn test_host_wrong_dictionary_does_not_roundtrip() {
    let text = b"shared header shared header and then the level body".to_vec();
    let prefs = Prefs {
        dictionary: Some(b"shared header ".to_vec()),
        ..Prefs::default()
    };
    let packed = compress_buffer(&text, &prefs).unwrap();

    let other = Prefs {
        dictionary: Some(b"SHARED HEADER ".to_vec()),
        ..Prefs::default()
    };
    let out = decompress_buffer(&packed.data, &other).unwrap();
    assert_ne!(out, text);
}
