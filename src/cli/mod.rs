//! Command-line interface for the `zx5` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and the display-level atomic behind `displaylevel!`. |
//! | [`op_mode`]   | `OpMode`, output-name inference and environment-based defaults. |
//! | [`args`]      | `ParsedArgs`: clap definition of the options and their validation into runtime preferences. |
//!
//! Typical call sequence: `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod op_mode;
pub mod args;
