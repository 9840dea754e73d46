//! Operation mode selection and startup defaults for the CLI.
//!
//! - [`OpMode`]: compress or decompress.
//! - [`default_output_filename`]: derives an output name from the input.
//! - [`init_nb_workers`]: reads the default batch worker count from the environment.

use crate::config::{ENV_NBWORKERS, NB_WORKERS_DEFAULT, ZX5_EXTENSION};
use crate::displaylevel;

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
}

/// Output name used when none is given on the command line.
///
/// Compression appends `.zx5`. Decompression strips it and returns `None`
/// when the input does not carry it.
pub fn default_output_filename(input: &str, op_mode: OpMode) -> Option<String> {
    match op_mode {
        OpMode::Compress => Some(format!("{}{}", input, ZX5_EXTENSION)),
        OpMode::Decompress => input
            .strip_suffix(ZX5_EXTENSION)
            .filter(|stem| !stem.is_empty())
            .map(str::to_owned),
    }
}

/// Read the number of batch workers from the `ZX5_NBWORKERS` environment variable.
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`].
///
/// `None` stands for an unset variable. Non-numeric values are reported at
/// display level 2 and replaced by [`NB_WORKERS_DEFAULT`].
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        if let Ok(val) = env.trim().parse::<usize>() {
            return val;
        }
        displaylevel!(
            2,
            "Ignore environment variable setting {}={}: not a valid unsigned value \n",
            ENV_NBWORKERS,
            env
        );
    }
    NB_WORKERS_DEFAULT
}
