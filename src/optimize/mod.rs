//! Cost model and optimal parser.
//!
//! [`optimize`] turns an input buffer into the cheapest chain of literal runs
//! and back-references the format can express, returned as a [`ParseChain`]
//! ready for [`crate::encode`].

pub mod chain;
pub mod cost;
pub mod frontier;
pub mod parser;

pub use chain::{ParseChain, Steps};
pub use cost::{elias_gamma_bits, offset_ceiling};
pub use parser::{optimize, optimize_in};
