//! Serialises a winning parse into the final bitstream.

use crate::config::{END_MARKER, INITIAL_OFFSET};
use crate::encode::bits::BitWriter;
use crate::error::{check_input, Zx5Error};
use crate::format::Format;
use crate::optimize::ParseChain;

/// A compressed buffer and its in-place decompression margin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub data: Vec<u8>,
    /// Minimum gap, in bytes, to keep between the end of the compressed data
    /// and the end of the decompression buffer when both overlap.
    pub delta: usize,
}

impl Compressed {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Token tally, reported at display level 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    pub literals: usize,
    pub last_offset: usize,
    pub second_offset: usize,
    pub third_offset: usize,
    pub new_offset: usize,
}

/// Size of the stream carrying a parse of `bits` bits.
///
/// Twenty extra bits hold the end marker: three indicator bits plus the
/// 17-bit code of 256.
pub fn output_size(bits: i64) -> usize {
    ((bits + 20 + 7) / 8) as usize
}

/// Encodes `chain`, the optimal parse of `input[skip..]`.
///
/// The chain is turned forward in place if it is not already.
pub fn encode(
    chain: &mut ParseChain,
    input: &[u8],
    skip: usize,
    format: Format,
) -> Result<Compressed, Zx5Error> {
    check_input(input.len(), skip)?;
    let (compressed, counts) = encode_counted(chain, input, skip, format);
    crate::displaylevel!(
        4,
        "encode: {} literal runs, {} last/{} 2nd/{} 3rd/{} new offset copies, delta {}\n",
        counts.literals,
        counts.last_offset,
        counts.second_offset,
        counts.third_offset,
        counts.new_offset,
        compressed.delta
    );
    Ok(compressed)
}

pub(crate) fn encode_counted(
    chain: &mut ParseChain,
    input: &[u8],
    skip: usize,
    format: Format,
) -> (Compressed, TokenCounts) {
    let Format { backwards, invert } = format;
    let size = output_size(chain.total_bits());
    let mut out = BitWriter::new(size, size as i64 - input.len() as i64 + skip as i64);
    let mut counts = TokenCounts::default();

    let mut last_offset1 = INITIAL_OFFSET;
    let mut last_offset2 = 0;
    let mut last_offset3 = 0;
    let mut input_index = skip;

    // the first token is always a literal run, whose indicator is implied
    out.skip_next_bit();

    for step in chain.tokens() {
        let (offset, length) = (step.offset, step.length);
        if offset == 0 {
            out.write_bit(false);
            out.write_interlaced_elias_gamma(length, backwards, false);
            for &byte in &input[input_index..input_index + length] {
                out.write_byte(byte);
                out.read_bytes(1);
            }
            counts.literals += 1;
        } else if offset == last_offset1 {
            out.write_bit(false);
            out.write_interlaced_elias_gamma(length, backwards, false);
            out.read_bytes(length);
            counts.last_offset += 1;
        } else if offset == last_offset2 {
            out.write_bit(true);
            out.write_bit(false);
            out.write_bit(false);
            out.write_interlaced_elias_gamma(length, backwards, false);
            out.read_bytes(length);

            last_offset2 = last_offset1;
            last_offset1 = offset;
            counts.second_offset += 1;
        } else if offset == last_offset3 {
            out.write_bit(true);
            out.write_bit(false);
            out.write_bit(true);
            out.write_interlaced_elias_gamma(length, backwards, false);
            out.read_bytes(length);

            last_offset3 = last_offset2;
            last_offset2 = last_offset1;
            last_offset1 = offset;
            counts.third_offset += 1;
        } else {
            out.write_bit(true);
            out.write_bit(true);
            // same value as the first bit of the length code, which is dropped
            out.write_bit(if length > 2 { backwards } else { !backwards });

            out.write_interlaced_elias_gamma((offset - 1) / 256 + 1, backwards, invert);
            let low = ((offset - 1) % 256) as u8;
            out.write_byte(if backwards { low } else { 255 - low });

            out.skip_next_bit();
            out.write_interlaced_elias_gamma(length - 1, backwards, false);
            out.read_bytes(length);

            last_offset3 = last_offset2;
            last_offset2 = last_offset1;
            last_offset1 = offset;
            counts.new_offset += 1;
        }
        input_index += length;
    }

    // end marker
    out.write_bit(true);
    out.write_bit(true);
    out.write_bit(false);
    out.write_interlaced_elias_gamma(END_MARKER, backwards, invert);

    debug_assert_eq!(out.len(), size, "parse cost disagrees with the encoded size");
    let (data, delta) = out.finish();
    (Compressed { data, delta }, counts)
}
