//! File-level front end of the compressor.
//!
//! The core works on in-memory buffers; this module adds what a host needs
//! around it: loading and storing whole files, the dictionary and direction
//! handling of [`file_io::compress_buffer`], and batch mode.

pub mod batch;
pub mod file_io;
pub mod prefs;

pub use prefs::Prefs;

/// Compress a single file.
pub use file_io::compress_filename;

/// Decompress a single file.
pub use file_io::decompress_filename;

pub use file_io::{compress_buffer, decompress_buffer, FileStats};

/// Compress multiple files with a given suffix.
pub use batch::compress_multiple_filenames;

/// Decompress multiple files, stripping a given suffix.
pub use batch::decompress_multiple_filenames;

pub use batch::BatchStats;
