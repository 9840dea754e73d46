//! Command-line argument parsing for the `zx5` binary.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and filename
//! discovered during the parse.
//!
//! Option syntax is handled by clap; the checks that involve more than one
//! option live in [`ParsedArgs::from_cli`] and return an `Err` whose message
//! begins with `"bad usage: "`.

use anyhow::{anyhow, bail};
use clap::{ArgAction, Parser};

use crate::cli::constants::COMPRESSOR_NAME;
use crate::cli::op_mode::{default_output_filename, init_nb_workers, OpMode};
use crate::io::prefs::Prefs;

/// Display level of the binary when neither `-v` nor `-s` is given.
pub const DEFAULT_DISPLAY_LEVEL: u32 = 2;

/// zx5: optimal data compressor for tiny decoders
#[derive(Parser, Debug)]
#[command(name = "zx5", version, about = "Optimal data compressor for tiny decoders")]
pub struct Cli {
    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Classic format (offset MSB bits not inverted)
    #[arg(short = 'c', long = "classic")]
    pub classic: bool,

    /// Backwards format, decoded from the end of the data
    #[arg(short = 'b', long = "backwards")]
    pub backwards: bool,

    /// Quick mode: smaller window, faster, slightly bigger output
    #[arg(short = 'q', long = "quick")]
    pub quick: bool,

    /// Decompress instead of compress
    #[arg(short = 'd', long = "decompress")]
    pub decompress: bool,

    /// Leave the first N bytes of the input out of the stream (still usable as history)
    #[arg(long = "skip", value_name = "N", default_value_t = 0)]
    pub skip: usize,

    /// Prime compression with the contents of FILE; the same file is needed to decompress
    #[arg(short = 'D', long = "dict", value_name = "FILE")]
    pub dictionary: Option<String>,

    /// Treat every argument as an input file (batch mode)
    #[arg(short = 'm', long = "multiple")]
    pub multiple: bool,

    /// Worker threads in batch mode (0 = auto)
    #[arg(short = 'T', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// More output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "silent")]
    pub verbose: u8,

    /// Errors only
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Input file, then optional output file (all inputs with -m)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by argument parsing.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Compression/decompression/IO preferences. The dictionary is not
    /// loaded yet; see `dictionary_filename`.
    pub prefs: Prefs,
    pub op_mode: OpMode,
    /// Treat all non-option arguments as input files.
    pub multiple_inputs: bool,
    /// Single input filename (non-multiple-input mode).
    pub input_filename: Option<String>,
    /// Single output filename (non-multiple-input mode), explicit or derived.
    pub output_filename: Option<String>,
    pub dictionary_filename: Option<String>,
    /// Input filenames collected in multiple-input mode.
    pub in_file_names: Vec<String>,
    pub display_level: u32,
}

impl ParsedArgs {
    /// Validates option combinations and resolves filenames.
    pub fn from_cli(cli: Cli) -> anyhow::Result<ParsedArgs> {
        let op_mode = if cli.decompress {
            OpMode::Decompress
        } else {
            OpMode::Compress
        };

        if op_mode == OpMode::Decompress && cli.skip > 0 {
            bail!("bad usage: --skip applies to compression only (skipped bytes are not in the stream)");
        }
        if cli.files.is_empty() {
            bail!("bad usage: no input file");
        }

        let mut prefs = Prefs {
            overwrite: cli.force,
            backwards: cli.backwards,
            classic: cli.classic,
            quick: cli.quick,
            skip: cli.skip,
            ..Prefs::default()
        };
        prefs.set_nb_workers(cli.threads.unwrap_or_else(init_nb_workers));

        let display_level = if cli.silent {
            1
        } else {
            DEFAULT_DISPLAY_LEVEL + u32::from(cli.verbose)
        };

        let (input_filename, output_filename, in_file_names) = if cli.multiple {
            (None, None, cli.files)
        } else {
            let mut files = cli.files.into_iter();
            let input = files.next().ok_or_else(|| anyhow!("bad usage: no input file"))?;
            let explicit = files.next();
            if let Some(extra) = files.next() {
                bail!(
                    "bad usage: unexpected argument '{}' (use -m to process several files)",
                    extra
                );
            }
            let output = match explicit {
                Some(output) => output,
                None => default_output_filename(&input, op_mode).ok_or_else(|| {
                    anyhow!(
                        "bad usage: cannot determine an output filename for '{}'",
                        input
                    )
                })?,
            };
            (Some(input), Some(output), Vec::new())
        };

        Ok(ParsedArgs {
            prefs,
            op_mode,
            multiple_inputs: cli.multiple,
            input_filename,
            output_filename,
            dictionary_filename: cli.dictionary,
            in_file_names,
            display_level,
        })
    }
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()`.
///
/// `--help`, `--version` and syntax errors are handled by clap, which prints
/// and exits.
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    ParsedArgs::from_cli(Cli::parse())
}

/// Parse an explicit argument list (without the program name).
///
/// This variant is callable from tests without touching `std::env`.
pub fn parse_args_from(argv: &[String]) -> anyhow::Result<ParsedArgs> {
    let argv = std::iter::once(COMPRESSOR_NAME.to_owned()).chain(argv.iter().cloned());
    let cli = Cli::try_parse_from(argv).map_err(|e| anyhow!("bad usage: {}", e))?;
    ParsedArgs::from_cli(cli)
}
