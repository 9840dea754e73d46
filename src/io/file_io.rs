//! Single-file compression and decompression.
//!
//! Whole files are loaded into memory: the optimizer needs random access to
//! the full input, and the target use is small assets.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::cli::constants::COMPRESSOR_NAME;
use crate::decode::{decompress, DecodeError};
use crate::encode::Compressed;
use crate::io::prefs::Prefs;
use crate::util::{copy_file_time, is_directory};

/// Sizes reported after a file has been processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// In-place decompression margin; zero after decompression.
    pub delta: usize,
}

// ---------------------------------------------------------------------------
// Source / destination
// ---------------------------------------------------------------------------

/// Reads a whole source file.
///
/// Directories are rejected with [`io::ErrorKind::InvalidInput`].
pub fn read_src_file(path: &str) -> io::Result<Vec<u8>> {
    if is_directory(Path::new(path)) {
        crate::displaylevel!(1, "{}: {} is a directory -- ignored\n", COMPRESSOR_NAME, path);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }
    fs::read(path).map_err(|e| {
        crate::displaylevel!(1, "Error: Cannot access input file {}: {}\n", path, e);
        e
    })
}

/// Writes `data` to `path`, honouring the overwrite policy of `prefs`.
///
/// Without `prefs.overwrite`, an existing destination is left untouched and
/// [`io::ErrorKind::AlreadyExists`] is returned.
pub fn write_dst_file(path: &str, data: &[u8], prefs: &Prefs) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if prefs.overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut f = options.open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            crate::displaylevel!(1, "Error: Already existing output file {}\n", path);
        } else {
            crate::displaylevel!(1, "Error: Cannot create output file {}: {}\n", path, e);
        }
        e
    })?;
    f.write_all(data)?;
    f.flush()
}

// ---------------------------------------------------------------------------
// Buffers
// ---------------------------------------------------------------------------

/// Compresses `data` as a host would: the dictionary goes in front (behind in
/// backwards mode), and a backwards stream is built by compressing the
/// reversed buffer and reversing the result.
pub fn compress_buffer(data: &[u8], prefs: &Prefs) -> io::Result<Compressed> {
    let dictionary = prefs.dictionary.as_deref().unwrap_or(&[]);
    let mut buffer = Vec::with_capacity(dictionary.len() + data.len());
    if prefs.backwards {
        buffer.extend_from_slice(data);
        buffer.extend_from_slice(dictionary);
        buffer.reverse();
    } else {
        buffer.extend_from_slice(dictionary);
        buffer.extend_from_slice(data);
    }

    let mut compressed = crate::compress(&buffer, &prefs.compress_options())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    if prefs.backwards {
        compressed.data.reverse();
    }
    Ok(compressed)
}

/// Inverse of [`compress_buffer`]. Skipped input bytes are not recoverable
/// and must be absent from `prefs`.
pub fn decompress_buffer(data: &[u8], prefs: &Prefs) -> io::Result<Vec<u8>> {
    let to_io = |e: DecodeError| io::Error::new(io::ErrorKind::InvalidData, e);
    let dictionary = prefs.dictionary.as_deref().unwrap_or(&[]);
    if prefs.backwards {
        let mut stream = data.to_vec();
        stream.reverse();
        let mut prefix = dictionary.to_vec();
        prefix.reverse();
        let mut out = decompress(&stream, &prefix, prefs.format()).map_err(to_io)?;
        out.reverse();
        Ok(out)
    } else {
        decompress(data, dictionary, prefs.format()).map_err(to_io)
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Gives `dst` the modification time of `src`; a failure is only reported.
fn keep_file_time(src: &str, dst: &str) -> bool {
    match copy_file_time(Path::new(src), Path::new(dst)) {
        Ok(()) => true,
        Err(e) => {
            crate::displaylevel!(3, "Warning: cannot copy timestamp to {}: {}\n", dst, e);
            false
        }
    }
}

/// Compresses `src` into `dst`.
///
/// The destination receives the modification time of the source.
pub fn compress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<FileStats> {
    let input = read_src_file(src)?;
    let compressed = compress_buffer(&input, prefs).map_err(|e| {
        crate::displaylevel!(1, "Error: {}: {}\n", src, e);
        e
    })?;
    write_dst_file(dst, &compressed.data, prefs)?;
    keep_file_time(src, dst);

    let stats = FileStats {
        bytes_in: input.len() as u64,
        bytes_out: compressed.len() as u64,
        delta: compressed.delta,
    };
    crate::displaylevel!(
        2,
        "File compressed from {} to {} bytes! (delta {})\n",
        stats.bytes_in,
        stats.bytes_out,
        stats.delta
    );
    Ok(stats)
}

/// Decompresses `src` into `dst`.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<FileStats> {
    let input = read_src_file(src)?;
    let output = decompress_buffer(&input, prefs).map_err(|e| {
        crate::displaylevel!(1, "Error: {}: {}\n", src, e);
        e
    })?;
    write_dst_file(dst, &output, prefs)?;
    keep_file_time(src, dst);

    let stats = FileStats {
        bytes_in: input.len() as u64,
        bytes_out: output.len() as u64,
        delta: 0,
    };
    crate::displaylevel!(
        2,
        "File decompressed from {} to {} bytes!\n",
        stats.bytes_in,
        stats.bytes_out
    );
    Ok(stats)
}
