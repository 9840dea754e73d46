//! Batch mode (`-m`): one job per input file on a fixed-size worker pool.
//!
//! Every job owns its input, its pools and its output; nothing is shared
//! between workers but the read-only preferences. Results travel back over a
//! channel and are tallied in input order.

use std::io;
use std::sync::Arc;

use crossbeam_channel::unbounded;

use crate::cli::constants::COMPRESSOR_NAME;
use crate::io::file_io::{compress_filename, decompress_filename, FileStats};
use crate::io::prefs::Prefs;

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Files that could not be processed.
    pub missed_files: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

type FileJob = fn(&str, &str, &Prefs) -> io::Result<FileStats>;

fn run_batch(jobs: Vec<(String, String)>, prefs: &Prefs, job: FileJob) -> io::Result<BatchStats> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(prefs.nb_workers.max(1))
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let prefs = Arc::new(prefs.clone());
    let (tx, rx) = unbounded();
    let nb_jobs = jobs.len();

    for (index, (src, dst)) in jobs.into_iter().enumerate() {
        let tx = tx.clone();
        let prefs = Arc::clone(&prefs);
        pool.spawn(move || {
            let result = job(&src, &dst, &prefs);
            // the receiver outlives every job
            let _ = tx.send((index, result));
        });
    }
    drop(tx);

    let mut results: Vec<Option<io::Result<FileStats>>> = (0..nb_jobs).map(|_| None).collect();
    for (index, result) in rx.iter() {
        results[index] = Some(result);
    }

    let mut stats = BatchStats::default();
    for result in results {
        match result {
            Some(Ok(file)) => {
                stats.bytes_in += file.bytes_in;
                stats.bytes_out += file.bytes_out;
            }
            _ => stats.missed_files += 1,
        }
    }
    Ok(stats)
}

/// Compresses every file in `srcs` to `<src><suffix>`.
pub fn compress_multiple_filenames(
    srcs: &[String],
    suffix: &str,
    prefs: &Prefs,
) -> io::Result<BatchStats> {
    let jobs = srcs
        .iter()
        .map(|src| (src.clone(), format!("{}{}", src, suffix)))
        .collect();
    let stats = run_batch(jobs, prefs, compress_filename)?;
    crate::displaylevel!(
        3,
        "{} files compressed, {} bytes to {} bytes\n",
        srcs.len() - stats.missed_files,
        stats.bytes_in,
        stats.bytes_out
    );
    Ok(stats)
}

/// Decompresses every file in `srcs`, dropping `suffix` from each name.
///
/// Files without the suffix are skipped and counted as missed.
pub fn decompress_multiple_filenames(
    srcs: &[String],
    suffix: &str,
    prefs: &Prefs,
) -> io::Result<BatchStats> {
    let mut jobs = Vec::with_capacity(srcs.len());
    let mut missed_files = 0;
    for src in srcs {
        match src.strip_suffix(suffix) {
            Some(stem) if !stem.is_empty() => jobs.push((src.clone(), stem.to_owned())),
            _ => {
                crate::displaylevel!(
                    1,
                    "{}: {}: unknown suffix ({} expected) -- ignored\n",
                    COMPRESSOR_NAME,
                    src,
                    suffix
                );
                missed_files += 1;
            }
        }
    }
    let mut stats = run_batch(jobs, prefs, decompress_filename)?;
    stats.missed_files += missed_files;
    Ok(stats)
}
