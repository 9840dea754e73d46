// prefs.rs: host preferences for file compression and decompression.
//
// `Prefs` collects everything the command line can change. The core only
// sees the `CompressOptions` derived from it; direction, dictionary handling
// and overwrite policy stay on the host side.

use crate::config::{MAX_OFFSET, MAX_OFFSET_QUICK, NB_WORKERS_MAX};
use crate::format::Format;
use crate::util::default_nb_workers;
use crate::CompressOptions;

/// File-level preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefs {
    /// Replace existing destination files.
    pub overwrite: bool,
    /// Produce or read a stream meant to be decoded from the end backwards.
    pub backwards: bool,
    /// Use the classic encoding (no inverted offset MSB bits).
    pub classic: bool,
    /// Restrict the window to `MAX_OFFSET_QUICK` for a faster search.
    pub quick: bool,
    /// Leading bytes of each input left out of the stream.
    pub skip: usize,
    /// Bytes placed in front of every input (behind it in backwards mode),
    /// usable by copies but never emitted.
    pub dictionary: Option<Vec<u8>>,
    /// Workers for batch mode.
    pub nb_workers: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: false,
            backwards: false,
            classic: false,
            quick: false,
            skip: 0,
            dictionary: None,
            nb_workers: 1,
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of batch workers, clamped to [1, NB_WORKERS_MAX].
    /// Zero selects a count from the machine's cores.
    /// Returns the actual value stored.
    pub fn set_nb_workers(&mut self, nb_workers: usize) -> usize {
        let n = if nb_workers == 0 {
            default_nb_workers()
        } else {
            nb_workers
        };
        self.nb_workers = n.clamp(1, NB_WORKERS_MAX);
        self.nb_workers
    }

    /// Bitstream variant selected by `-b` / `-c`.
    pub fn format(&self) -> Format {
        if self.backwards {
            Format::BACKWARDS
        } else if self.classic {
            Format::CLASSIC
        } else {
            Format::STANDARD
        }
    }

    pub fn offset_limit(&self) -> usize {
        if self.quick {
            MAX_OFFSET_QUICK
        } else {
            MAX_OFFSET
        }
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.as_ref().map_or(0, Vec::len)
    }

    /// Options for the core, given a buffer that already carries the
    /// dictionary in front.
    pub fn compress_options(&self) -> CompressOptions {
        CompressOptions {
            skip: self.dictionary_len() + self.skip,
            offset_limit: self.offset_limit(),
            format: self.format(),
        }
    }
}
