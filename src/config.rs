// config.rs: Compile-time configuration constants.
//
// Everything that shapes the compressed format lives here alongside the
// tunables of the optimizer and the host program. Format constants must not
// change: an existing decoder relies on them bit for bit.

// Offset every stream starts with as its "last offset".
// No match can exist at the first compressible byte, so this value never
// collides with a real back-reference there; after the first literal run it
// behaves like any other remembered offset.
pub const INITIAL_OFFSET: usize = 1;

// Value of the most-significant-byte code that marks the end of the stream.
// A new-offset token encodes `(offset - 1) / 256 + 1` with the same code, so
// real offsets must keep that quantity strictly below this value.
pub const END_MARKER: usize = 256;

// Largest back-reference distance the optimizer will consider by default.
// Derived from END_MARKER: (65280 - 1) / 256 + 1 == 255.
pub const MAX_OFFSET: usize = (END_MARKER - 1) * 256;

// Window used by quick mode (-q). Trades ratio for a much shorter search.
pub const MAX_OFFSET_QUICK: usize = 2176;

// Number of offset-history buckets per cost frontier.
// Bucket order is part of the tie-break between equal-cost parses, so
// changing it changes the exact output bytes (never their size).
pub const HASH_SIZE: usize = 31;

// Records reserved at once when a pool runs out of recycled records.
pub const STEP_CHUNK: usize = 10_000;
pub const ENTRY_CHUNK: usize = 10_000;

// Granularity of the optimizer's progress bar (dots across the input).
pub const PROGRESS_SCALE: usize = 55;

// Default output file extension.
pub const ZX5_EXTENSION: &str = ".zx5";

// Default number of batch-mode workers (-T#).
// Can be overridden by the ZX5_NBWORKERS environment variable.
pub const NB_WORKERS_DEFAULT: usize = 1;

// Maximum number of batch-mode workers selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

// Environment variable consulted for the default worker count.
pub const ENV_NBWORKERS: &str = "ZX5_NBWORKERS";
