//! Filesystem and platform helpers used by the host program.
//!
//! - [`cores`]      : worker count defaults
//! - [`file_status`]: regular-file checks and timestamp preservation

pub mod cores;
pub mod file_status;

pub use cores::default_nb_workers;
pub use file_status::{copy_file_time, is_directory, is_reg_file};
