//! Bit-level output with in-place decompression bookkeeping.

/// Packs bits and raw bytes into one buffer.
///
/// Also tracks the decompression safety margin: every byte the decoder will
/// produce counts as read, every byte of compressed output as written, and
/// the largest excess of reads over writes seen along the way is the delta a
/// host must leave between the two buffers for in-place decompression.
pub struct BitWriter {
    output: Vec<u8>,
    bit_index: usize,
    bit_mask: u8,
    skip_next: bool,
    diff: i64,
    delta: i64,
}

impl BitWriter {
    /// Writer for a stream of exactly `output_size` bytes.
    ///
    /// `initial_diff` seeds the margin counter (output size minus the bytes
    /// the stream will reproduce).
    pub fn new(output_size: usize, initial_diff: i64) -> Self {
        BitWriter {
            output: Vec::with_capacity(output_size),
            bit_index: 0,
            bit_mask: 0,
            skip_next: false,
            diff: initial_diff,
            delta: 0,
        }
    }

    /// Drops the next bit instead of writing it.
    pub fn skip_next_bit(&mut self) {
        self.skip_next = true;
    }

    /// Accounts for `n` bytes the decoder will produce.
    pub fn read_bytes(&mut self, n: usize) {
        self.diff += n as i64;
        if self.diff > self.delta {
            self.delta = self.diff;
        }
    }

    pub fn write_byte(&mut self, value: u8) {
        self.output.push(value);
        self.diff -= 1;
    }

    pub fn write_bit(&mut self, value: bool) {
        if self.skip_next {
            self.skip_next = false;
            return;
        }
        if self.bit_mask == 0 {
            self.bit_mask = 0x80;
            self.bit_index = self.output.len();
            self.write_byte(0);
        }
        if value {
            self.output[self.bit_index] |= self.bit_mask;
        }
        self.bit_mask >>= 1;
    }

    /// Writes `value` (positive) as an interlaced Elias-gamma code.
    pub fn write_interlaced_elias_gamma(&mut self, value: usize, backwards: bool, invert: bool) {
        debug_assert!(value > 0);
        let mut i = 1usize << (usize::BITS - 1 - value.leading_zeros());
        loop {
            i >>= 1;
            if i == 0 {
                break;
            }
            self.write_bit(backwards);
            self.write_bit((value & i != 0) != invert);
        }
        self.write_bit(!backwards);
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Largest read-over-write excess seen so far.
    pub fn delta(&self) -> usize {
        self.delta as usize
    }

    /// Returns the buffer and the safety margin.
    pub fn finish(self) -> (Vec<u8>, usize) {
        let delta = self.delta as usize;
        (self.output, delta)
    }
}
