//! Bit costs of every token shape, and the per-position offset ceiling.

use crate::config::INITIAL_OFFSET;

/// Size in bits of `value` under the interlaced Elias-gamma code.
///
/// A value of bit-length `k` costs `2k - 1` bits. `value` must be positive.
#[inline]
pub fn elias_gamma_bits(value: usize) -> i64 {
    debug_assert!(value > 0);
    let mut bits = 1;
    let mut v = value >> 1;
    while v != 0 {
        bits += 2;
        v >>= 1;
    }
    bits
}

/// Largest offset worth trying at `index` for a window of `offset_limit`.
///
/// Never below [`INITIAL_OFFSET`], so the start-of-input state always has a
/// frontier slot.
#[inline]
pub fn offset_ceiling(index: usize, offset_limit: usize) -> usize {
    if index > offset_limit {
        offset_limit
    } else if index < INITIAL_OFFSET {
        INITIAL_OFFSET
    } else {
        index
    }
}

/// Literal run: indicator, length, raw bytes.
#[inline]
pub fn literal_cost(length: usize) -> i64 {
    1 + elias_gamma_bits(length) + 8 * length as i64
}

/// Match reusing the last offset, right after a literal run.
#[inline]
pub fn last_offset_cost(length: usize) -> i64 {
    1 + elias_gamma_bits(length)
}

/// Match reusing the 2nd or 3rd last offset.
#[inline]
pub fn previous_offset_cost(length: usize) -> i64 {
    3 + elias_gamma_bits(length)
}

/// Match at a brand-new offset. `length` must be at least 2.
///
/// Two indicator bits, the variant bit and the raw low byte make 11 bits;
/// one is recovered because the first bit of the length code is never sent.
#[inline]
pub fn new_offset_cost(offset: usize, length: usize) -> i64 {
    10 + elias_gamma_bits((offset - 1) / 256 + 1) + elias_gamma_bits(length - 1)
}
