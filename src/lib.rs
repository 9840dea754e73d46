// zx5: optimal-parsing compressor for tiny, fast decoders

pub mod config;
pub mod error;
pub mod format;
pub mod pool;
pub mod optimize;
pub mod encode;
pub mod decode;
pub mod util;
pub mod io;
pub mod cli;

// ── Version constants ────────────────────────────────────────────────────────
pub const ZX5_VERSION_MAJOR: u32 = 1;
pub const ZX5_VERSION_MINOR: u32 = 0;
pub const ZX5_VERSION_RELEASE: u32 = 0;
pub const ZX5_VERSION_STRING: &str = "1.0.0";

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    ZX5_VERSION_STRING
}

// ── One-shot API ─────────────────────────────────────────────────────────────

/// Everything the core needs besides the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Leading bytes left out of the stream but available to copies.
    pub skip: usize,
    /// Largest back-reference distance to consider.
    pub offset_limit: usize,
    pub format: Format,
}

impl Default for CompressOptions {
    fn default() -> Self {
        CompressOptions {
            skip: 0,
            offset_limit: config::MAX_OFFSET,
            format: Format::STANDARD,
        }
    }
}

/// Optimizes and encodes `input` in one go.
pub fn compress(input: &[u8], options: &CompressOptions) -> Result<Compressed, Zx5Error> {
    let mut chain = optimize::optimize(input, options.skip, options.offset_limit)?;
    encode::encode(&mut chain, input, options.skip, options.format)
}

// ── Top-level re-exports ─────────────────────────────────────────────────────
pub use cli::constants::{display_level, set_display_level};
pub use decode::{decompress, decompress_bounded, DecodeError};
pub use encode::{encode, Compressed};
pub use error::Zx5Error;
pub use format::Format;
pub use optimize::{optimize, optimize_in, ParseChain};
pub use pool::Arena;
