//! Binary entry point for the `zx5` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. [`run`] loads the dictionary, dispatches to the appropriate I/O
//!    operation and returns an exit code.

use anyhow::Context;

use zx5::cli::args::{parse_args, ParsedArgs};
use zx5::cli::constants::{set_display_level, AUTHOR, COMPRESSOR_NAME};
use zx5::cli::op_mode::OpMode;
use zx5::config::ZX5_EXTENSION;
use zx5::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames,
};

/// Loads the dictionary named on the command line into the preferences.
fn load_dictionary(args: &mut ParsedArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.dictionary_filename {
        let bytes = std::fs::read(path)
            .with_context(|| format!("cannot read dictionary {}", path))?;
        zx5::displaylevel!(3, "Using dictionary {} ({} bytes)\n", path, bytes.len());
        args.prefs.dictionary = Some(bytes);
    }
    Ok(())
}

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, non-zero = error).
fn run(mut args: ParsedArgs) -> i32 {
    zx5::displaylevel!(
        3,
        "{} v{}: optimal data compressor by {}\n",
        COMPRESSOR_NAME,
        zx5::ZX5_VERSION_STRING,
        AUTHOR
    );

    if let Err(e) = load_dictionary(&mut args) {
        zx5::displaylevel!(1, "Error: {:#}\n", e);
        return 1;
    }

    let prefs = &args.prefs;
    if args.multiple_inputs {
        let result = match args.op_mode {
            OpMode::Compress => {
                compress_multiple_filenames(&args.in_file_names, ZX5_EXTENSION, prefs)
            }
            OpMode::Decompress => {
                decompress_multiple_filenames(&args.in_file_names, ZX5_EXTENSION, prefs)
            }
        };
        return match result {
            Ok(stats) => stats.missed_files.min(i32::MAX as usize) as i32,
            Err(e) => {
                zx5::displaylevel!(1, "Error: {}\n", e);
                1
            }
        };
    }

    let (Some(input), Some(output)) = (&args.input_filename, &args.output_filename) else {
        zx5::displaylevel!(1, "Error: no input file\n");
        return 1;
    };
    let result = match args.op_mode {
        OpMode::Compress => compress_filename(input, output, prefs),
        OpMode::Decompress => decompress_filename(input, output, prefs),
    };
    // the I/O layer has already reported the failure
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {}", COMPRESSOR_NAME, e);
            std::process::exit(1);
        }
    };

    set_display_level(args.display_level);
    let exit_code = run(args);
    std::process::exit(exit_code);
}
