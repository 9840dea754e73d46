//! Pool allocator for the optimizer's parse graph.
//!
//! Two record kinds are pooled: parse steps and offset states. Both are
//! recycled in place through per-kind free lists so the optimizer's hot loop
//! rarely reaches the system allocator.

pub mod arena;
pub mod slab;

pub use arena::{Arena, ArenaStats, Entry, EntryRef, Step, StepRef};
pub use slab::{Pool, PoolError, PoolStats};
