//! Bitstream layout shared by the encoder and the decoder.
//!
//! The stream has no header. Bits are packed most-significant first into
//! bytes that are interleaved with raw bytes: a new bit byte is claimed at the
//! current output position only when the previous one is full.
//!
//! ```text
//! literal run         0  gamma(length)  byte*length
//! copy, last offset   0  gamma(length)              (only after a literal run)
//! copy, 2nd last      1 0 0  gamma(length)
//! copy, 3rd last      1 0 1  gamma(length)
//! copy, new offset    1 1 v  gamma(msb) lsb  gamma(length - 1) minus first bit
//! end of stream       1 1 0  gamma(256)
//! ```
//!
//! The indicator of the very first token is never written: decoding always
//! starts with a literal run. In a new-offset token, `v` doubles as the first
//! bit of the length code, which is therefore not repeated. `msb` is
//! `(offset - 1) / 256 + 1`; `lsb` is the low byte of `offset - 1`, stored
//! complemented unless the stream is backwards.
//!
//! Gamma codes are interlaced: for each bit below the leading one, a
//! continuation bit equal to the backwards flag is followed by the data bit;
//! a single terminator bit (the opposite value) closes the code. Data bits of
//! the offset `msb` code, and of the end marker, are complemented when the
//! invert flag is set.

/// Out-of-band choices a decoder must know to read a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Format {
    /// Bit-order toggle used by streams meant to be decoded back to front.
    pub backwards: bool,
    /// Complements the data bits of offset codes.
    pub invert: bool,
}

impl Format {
    /// Format used by default: forward, inverted offset codes.
    pub const STANDARD: Format = Format {
        backwards: false,
        invert: true,
    };

    /// Forward without inversion.
    pub const CLASSIC: Format = Format {
        backwards: false,
        invert: false,
    };

    /// Backwards streams never invert.
    pub const BACKWARDS: Format = Format {
        backwards: true,
        invert: false,
    };

    /// Continuation bit of the interlaced gamma code.
    #[inline]
    pub fn continuation(&self) -> bool {
        self.backwards
    }
}
