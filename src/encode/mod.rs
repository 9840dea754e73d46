//! Bitstream encoder.
//!
//! Walks a [`ParseChain`](crate::optimize::ParseChain) in input order and
//! writes it out in the layout documented in [`crate::format`].

pub mod bits;
pub mod compress;

pub use bits::BitWriter;
pub use compress::{encode, output_size, Compressed, TokenCounts};
