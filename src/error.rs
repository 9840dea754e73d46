//! Status type shared by the optimizer and the encoder.
//!
//! The core has no recoverable failure modes for well-formed input: every
//! variant here either reports a caller contract violation, detected before
//! any work starts, or a fatal allocation failure that aborts the job.

use std::fmt;

use crate::pool::PoolError;

/// Errors returned by [`crate::optimize`] and [`crate::compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zx5Error {
    /// A pool could not reserve another chunk of records.
    OutOfMemory {
        /// Which pool ran dry (`"step"` or `"entry"`).
        pool: &'static str,
    },
    /// The input buffer is empty.
    EmptyInput,
    /// `skip` leaves nothing to compress (`skip >= size`).
    InvalidSkip { skip: usize, size: usize },
    /// The window limit is zero.
    InvalidWindow,
    /// No parse reached the end of the input. Never expected for valid input.
    NoParse,
}

impl fmt::Display for Zx5Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zx5Error::OutOfMemory { pool } => {
                write!(f, "insufficient memory ({} pool exhausted)", pool)
            }
            Zx5Error::EmptyInput => f.write_str("empty input"),
            Zx5Error::InvalidSkip { skip, size } => {
                write!(f, "skipping {} bytes leaves nothing of {} to compress", skip, size)
            }
            Zx5Error::InvalidWindow => f.write_str("window limit must be at least 1"),
            Zx5Error::NoParse => f.write_str("internal error: no parse reaches the end of input"),
        }
    }
}

impl std::error::Error for Zx5Error {}

impl From<PoolError> for Zx5Error {
    fn from(e: PoolError) -> Self {
        match e {
            PoolError::Exhausted { pool } => Zx5Error::OutOfMemory { pool },
        }
    }
}

/// Validates the preconditions shared by `optimize` and `compress`.
pub(crate) fn check_input(size: usize, skip: usize) -> Result<(), Zx5Error> {
    if size == 0 {
        return Err(Zx5Error::EmptyInput);
    }
    if skip >= size {
        return Err(Zx5Error::InvalidSkip { skip, size });
    }
    Ok(())
}
