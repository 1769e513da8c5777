//! Shared command line front end for `btok` and `ktob`

pub mod exit;
pub mod logging;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::cli::exit::{CliResult, FAILURE, SUCCESS, io_error, quote_error};
use crate::cli::logging::{LogFormat, LogLevel, init_logging};
use crate::{Config, DEFAULT_CONTROL, DEFAULT_PREFIX, DEFAULT_REPEAT, Decoder, Encoder};

/// Which way a program converts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// Identity of one of the two executables
#[derive(Debug, Clone, Copy)]
pub struct Program {
    pub name: &'static str,
    pub title: &'static str,
    pub about: &'static str,
    pub direction: Direction,
}

pub const BTOK: Program = Program {
    name: "btok",
    title: "Binary to Kermit",
    about: "Writes the input to standard output prefixed and quoted the way a Kermit \
            packet would be: 7 bits, no control characters, text left readable",
    direction: Direction::Encode,
};

pub const KTOB: Program = Program {
    name: "ktob",
    title: "Kermit to Binary",
    about: "Translates text produced by btok back into the binary it came from",
    direction: Direction::Decode,
};

impl Program {
    pub fn version(&self) -> String {
        format!(
            "{} ({}) Version {}",
            self.name,
            self.title,
            env!("CARGO_PKG_VERSION")
        )
    }

    fn command(&self) -> clap::Command {
        Args::command().name(self.name).about(self.about)
    }
}

#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Files to convert, in order. Standard input when none are given.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Prefix character for bytes with the 8th bit set.
    #[arg(short = 'p', value_name = "CHAR", default_value_t = DEFAULT_PREFIX as char, value_parser = parse_marker)]
    pub prefix: char,

    /// Control character used to quote control bytes and markers.
    #[arg(short = 'c', value_name = "CHAR", default_value_t = DEFAULT_CONTROL as char, value_parser = parse_marker)]
    pub control: char,

    /// Repeat character (reserved: quoted, never expanded).
    #[arg(short = 'r', value_name = "CHAR", default_value_t = DEFAULT_REPEAT as char, value_parser = parse_marker)]
    pub repeat: char,

    /// Translate and prefix carriage returns and line feeds.
    #[arg(short = 'l')]
    pub translate_newlines: bool,

    /// Reject escape sequences the encoder never produces (decoding only).
    #[arg(long)]
    pub strict: bool,

    /// Print the version number.
    #[arg(short = 'v')]
    pub version: bool,

    /// Print this usage text.
    #[arg(short = '?', long = "help")]
    pub help: bool,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

impl Args {
    /// Marker configuration selected on the command line
    pub fn config(&self) -> crate::Result<Config> {
        Ok(Config::new(self.prefix as u8, self.control as u8, self.repeat as u8)?
            .with_translate_newlines(self.translate_newlines))
    }
}

fn parse_marker(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("expected a single ASCII character, got {value:?}")),
    }
}

/// Parse arguments for `program`
///
/// `Err` carries the exit code when the process should stop right away
/// (usage or version requests, parse failures).
pub fn parse_args<I, T>(program: &Program, args: I) -> Result<Args, i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = program.command();
    let parsed = command
        .try_get_matches_from_mut(args)
        .and_then(|matches| Args::from_arg_matches(&matches));

    match parsed {
        Ok(args) if args.help => {
            println!("{}", command.render_help());
            Err(FAILURE)
        }
        Ok(args) if args.version => {
            println!("{}", program.version());
            Err(SUCCESS)
        }
        Ok(args) => Ok(args),
        Err(err) => {
            eprint!("{err}");
            eprintln!("{}", command.render_help());
            Err(FAILURE)
        }
    }
}

/// Entry point shared by both binaries; returns the process exit code
pub fn main(program: &Program) -> i32 {
    let args = match parse_args(program, std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.log_format, args.log_level);

    match run(program, &args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            err.code
        }
    }
}

/// Convert every input in order onto standard output
///
/// Inputs that cannot be opened are reported and skipped; the run then
/// finishes with [`FAILURE`] instead of [`SUCCESS`].
pub fn run(program: &Program, args: &Args) -> CliResult<i32> {
    let config = args
        .config()
        .map_err(|err| quote_error("marker characters", err))?;

    if args.strict && program.direction == Direction::Encode {
        tracing::warn!("--strict only applies when decoding, ignoring it");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = convert_all(program, args, config, &mut out);
    out.flush().map_err(|err| io_error("write to standard output", err))?;
    let failed = result?;

    Ok(if failed { FAILURE } else { SUCCESS })
}

/// Returns whether any input could not be opened
fn convert_all<W: Write>(
    program: &Program,
    args: &Args,
    config: Config,
    out: &mut W,
) -> CliResult<bool> {
    if args.files.is_empty() {
        convert(program, args, config, io::stdin().lock(), &mut *out, "<stdin>")?;
        return Ok(false);
    }

    let mut failed = false;
    for path in &args.files {
        if is_stdin(path) {
            convert(program, args, config, io::stdin().lock(), &mut *out, "<stdin>")?;
            continue;
        }

        match File::open(path) {
            Ok(file) => {
                let name = path.display().to_string();
                convert(program, args, config, file, &mut *out, &name)?;
            }
            Err(err) => {
                eprintln!("Could Not Open {} in {}.", path.display(), program.name);
                tracing::debug!(path = %path.display(), error = %err, "open failed");
                failed = true;
            }
        }
    }
    Ok(failed)
}

fn convert<R: Read, W: Write>(
    program: &Program,
    args: &Args,
    config: Config,
    input: R,
    output: W,
    name: &str,
) -> CliResult<()> {
    let context = match program.direction {
        Direction::Encode => format!("encode {name}"),
        Direction::Decode => format!("decode {name}"),
    };

    match program.direction {
        Direction::Encode => {
            let stats = Encoder::with_config(config)
                .encode(input, output)
                .map_err(|err| quote_error(&context, err))?;
            tracing::info!(
                input = name,
                bytes = stats.bytes_in,
                chars = stats.chars_out,
                "encoded"
            );
        }
        Direction::Decode => {
            let mut decoder = Decoder::with_config(config);
            if args.strict {
                decoder = decoder.strict();
            }
            let stats = decoder
                .decode(input, output)
                .map_err(|err| quote_error(&context, err))?;
            tracing::info!(
                input = name,
                chars = stats.chars_in,
                bytes = stats.bytes_out,
                "decoded"
            );
        }
    }
    Ok(())
}

/// `-` names standard input
fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
