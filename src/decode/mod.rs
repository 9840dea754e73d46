//! Reference decoder for the bitstream of [`crate::format`].
//!
//! Mirrors what a target-side decompressor does, on in-memory buffers. It
//! starts in literal mode; a `0` indicator after a literal run means a copy
//! from the last offset, and after any copy it means a new literal run.

use std::fmt;

use crate::config::{END_MARKER, INITIAL_OFFSET};
use crate::format::Format;

/// Errors produced while decoding a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended before the end marker.
    Truncated,
    /// A copy reaches before the start of the available data.
    OffsetOutOfRange { offset: usize, available: usize },
    /// A length code does not fit in a machine word.
    LengthOverflow,
    /// The output would grow past the caller's limit.
    OutputLimit { limit: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated => f.write_str("truncated stream"),
            DecodeError::OffsetOutOfRange { offset, available } => write!(
                f,
                "offset {} reaches before the start of data ({} bytes available)",
                offset, available
            ),
            DecodeError::LengthOverflow => f.write_str("length code overflows"),
            DecodeError::OutputLimit { limit } => {
                write!(f, "decoded data exceeds the {} byte limit", limit)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

// ─────────────────────────────────────────────────────────────────────────────
// Bit input
// ─────────────────────────────────────────────────────────────────────────────

struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    bit_mask: u8,
    bit_value: u8,
    pending: Option<bool>,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        BitReader {
            data,
            pos: 0,
            bit_mask: 0,
            bit_value: 0,
            pending: None,
        }
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.data.get(self.pos).ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_bit(&mut self) -> Result<bool, DecodeError> {
        if let Some(bit) = self.pending.take() {
            return Ok(bit);
        }
        if self.bit_mask == 0 {
            self.bit_mask = 0x80;
            self.bit_value = self.read_byte()?;
        }
        let bit = self.bit_value & self.bit_mask != 0;
        self.bit_mask >>= 1;
        Ok(bit)
    }

    /// Makes `bit` the next one returned, ahead of the stream.
    fn push_back(&mut self, bit: bool) {
        self.pending = Some(bit);
    }

    fn read_interlaced_elias_gamma(&mut self, backwards: bool, invert: bool) -> Result<usize, DecodeError> {
        let mut value = 1usize;
        while self.read_bit()? == backwards {
            if value > usize::MAX >> 1 {
                return Err(DecodeError::LengthOverflow);
            }
            let bit = self.read_bit()? != invert;
            value = value << 1 | bit as usize;
        }
        Ok(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoder
// ─────────────────────────────────────────────────────────────────────────────

enum State {
    Literal,
    LastOffset,
    OtherOffset,
}

fn check_room(out: &[u8], length: usize, limit: usize) -> Result<(), DecodeError> {
    match out.len().checked_add(length) {
        Some(end) if end <= limit => Ok(()),
        _ => Err(DecodeError::OutputLimit { limit }),
    }
}

fn copy_match(out: &mut Vec<u8>, offset: usize, length: usize) -> Result<(), DecodeError> {
    if offset == 0 || offset > out.len() {
        return Err(DecodeError::OffsetOutOfRange {
            offset,
            available: out.len(),
        });
    }
    let mut from = out.len() - offset;
    for _ in 0..length {
        let byte = out[from];
        out.push(byte);
        from += 1;
    }
    Ok(())
}

/// Decodes `data` and returns the reproduced bytes.
///
/// `prefix` holds the bytes that were skipped at compression time; copies
/// may reference them but they are not part of the result.
pub fn decompress(data: &[u8], prefix: &[u8], format: Format) -> Result<Vec<u8>, DecodeError> {
    decompress_bounded(data, prefix, format, usize::MAX)
}

/// [`decompress`] for untrusted streams: fails once more than `max_output`
/// bytes (prefix excluded) would be produced.
pub fn decompress_bounded(
    data: &[u8],
    prefix: &[u8],
    format: Format,
    max_output: usize,
) -> Result<Vec<u8>, DecodeError> {
    let Format { backwards, invert } = format;
    let limit = prefix.len().saturating_add(max_output);
    let mut input = BitReader::new(data);
    let mut out = Vec::with_capacity(prefix.len() + data.len() * 2);
    out.extend_from_slice(prefix);

    let mut last_offset1 = INITIAL_OFFSET;
    let mut last_offset2 = 0;
    let mut last_offset3 = 0;
    let mut state = State::Literal;

    loop {
        match state {
            State::Literal => {
                let length = input.read_interlaced_elias_gamma(backwards, false)?;
                check_room(&out, length, limit)?;
                out.reserve(length.min(data.len()));
                for _ in 0..length {
                    out.push(input.read_byte()?);
                }
                state = if input.read_bit()? {
                    State::OtherOffset
                } else {
                    State::LastOffset
                };
            }
            State::LastOffset => {
                let length = input.read_interlaced_elias_gamma(backwards, false)?;
                check_room(&out, length, limit)?;
                copy_match(&mut out, last_offset1, length)?;
                state = if input.read_bit()? {
                    State::OtherOffset
                } else {
                    State::Literal
                };
            }
            State::OtherOffset => {
                if !input.read_bit()? {
                    if !input.read_bit()? {
                        std::mem::swap(&mut last_offset1, &mut last_offset2);
                    } else {
                        let offset = last_offset3;
                        last_offset3 = last_offset2;
                        last_offset2 = last_offset1;
                        last_offset1 = offset;
                    }
                    let length = input.read_interlaced_elias_gamma(backwards, false)?;
                    check_room(&out, length, limit)?;
                    copy_match(&mut out, last_offset1, length)?;
                } else {
                    let first_length_bit = input.read_bit()?;
                    let msb = input.read_interlaced_elias_gamma(backwards, invert)?;
                    if msb == END_MARKER {
                        break;
                    }
                    let lsb = input.read_byte()?;
                    let low = if backwards { lsb } else { 255 - lsb };
                    let offset = (msb - 1)
                        .checked_mul(256)
                        .and_then(|high| high.checked_add(low as usize + 1))
                        .ok_or(DecodeError::LengthOverflow)?;

                    input.push_back(first_length_bit);
                    let length = input
                        .read_interlaced_elias_gamma(backwards, false)?
                        .checked_add(1)
                        .ok_or(DecodeError::LengthOverflow)?;

                    last_offset3 = last_offset2;
                    last_offset2 = last_offset1;
                    last_offset1 = offset;
                    check_room(&out, length, limit)?;
                    copy_match(&mut out, offset, length)?;
                }
                state = if input.read_bit()? {
                    State::OtherOffset
                } else {
                    State::Literal
                };
            }
        }
    }

    Ok(out.split_off(prefix.len()))
}
