//! Command-line parsing and validation.
//!
//! Everything here runs before any file is read; the result is a [`Params`]
//! the batch transform can trust.

use std::path::{Path, PathBuf};

use crate::error::ArgsError;
use crate::general::batch::{Mode, Selection};
use crate::general::transpose::{NOTE_MAX, NOTE_MIN};

pub const FILE_EXTENSION: &str = "mbseq";

pub const USAGE: &str = "\
Manipulate MicroBrute *.mbseq files.

Usage: mbseq-transposer <source> [options]

Options:
  -o, --output <file>     File the result is written to (default: overwrite source)
  -i, --index <n>...      Sequences to change, numbers 1 to 8 (default: all)
  -t, --transpose         Only transpose, do not equalize
  -r, --reference <n>     MIDI note to equalize to (1-125, default 60),
                          or semitones to transpose by with -t
      --debug             Verbose logging
  -h, --help              Show this help";

/// Validated parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub source: PathBuf,
    pub output: PathBuf,
    pub selection: Selection,
    pub mode: Mode,
    pub debug: bool,
}

/// Outcome of reading the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Params),
    Help,
}

/// Raw flags before validation.
#[derive(Debug, Default)]
struct RawArgs {
    source: Option<String>,
    output: Option<String>,
    index: Option<Vec<i64>>,
    transpose: bool,
    reference: Option<i64>,
    debug: bool,
}

/// Parse `args` (without the program name). `default_reference` is used in
/// equalize mode when `-r` is absent.
pub fn parse<I, S>(args: I, default_reference: u8) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut raw = RawArgs::default();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        i += 1;
        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "-t" | "--transpose" => raw.transpose = true,
            "--debug" => raw.debug = true,
            "-o" | "--output" => {
                let value = args.get(i).ok_or_else(|| ArgsError::MissingValue(arg.to_string()))?;
                raw.output = Some(value.clone());
                i += 1;
            }
            "-r" | "--reference" => {
                let value = args.get(i).ok_or_else(|| ArgsError::MissingValue(arg.to_string()))?;
                raw.reference = Some(parse_number(arg, value)?);
                i += 1;
            }
            "-i" | "--index" => {
                let mut values = Vec::new();
                while let Some(value) = args.get(i).filter(|v| !is_flag(v)) {
                    values.push(parse_number(arg, value)?);
                    i += 1;
                }
                if values.is_empty() {
                    return Err(ArgsError::MissingValue(arg.to_string()));
                }
                raw.index = Some(values);
            }
            _ if is_flag(arg) => return Err(ArgsError::Unknown(arg.to_string())),
            _ if raw.source.is_none() => raw.source = Some(arg.to_string()),
            _ => return Err(ArgsError::Unknown(arg.to_string())),
        }
    }

    validate(raw, default_reference).map(Command::Run)
}

// a lone "-5" is a negative number, not a flag
fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg.parse::<i64>().is_err()
}

fn parse_number(flag: &str, value: &str) -> Result<i64, ArgsError> {
    value.parse().map_err(|_| ArgsError::NotANumber { flag: flag.to_string(), value: value.to_string() })
}

fn validate(raw: RawArgs, default_reference: u8) -> Result<Params, ArgsError> {
    let source = PathBuf::from(raw.source.ok_or(ArgsError::MissingSource)?);
    if !has_extension(&source) {
        return Err(ArgsError::BadExtension(source));
    }

    let output = match raw.output {
        Some(name) => output_path(PathBuf::from(name))?,
        None => source.clone(),
    };

    let selection = match raw.index {
        Some(indices) => Selection::from_indices(&indices)?,
        None => Selection::all(),
    };

    let mode = if raw.transpose {
        let semitones = raw.reference.ok_or(ArgsError::MissingSemitones)?;
        let semitones = i32::try_from(semitones).map_err(|_| ArgsError::NotANumber {
            flag: "--reference".to_string(),
            value: semitones.to_string(),
        })?;
        Mode::Transpose { semitones }
    } else {
        let reference = match raw.reference {
            Some(value) => u8::try_from(value)
                .ok()
                .filter(|n| (NOTE_MIN..=NOTE_MAX).contains(n))
                .ok_or(ArgsError::ReferenceOutOfRange { value, min: NOTE_MIN, max: NOTE_MAX })?,
            None => default_reference,
        };
        Mode::Equalize { reference }
    };

    Ok(Params { source, output, selection, mode, debug: raw.debug })
}

fn has_extension(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == FILE_EXTENSION)
}

/// `name` without extension gets `.mbseq` appended, `name.mbseq` is kept, any
/// other extension is refused.
fn output_path(path: PathBuf) -> Result<PathBuf, ArgsError> {
    match path.extension() {
        None => Ok(path.with_extension(FILE_EXTENSION)),
        Some(ext) if ext == FILE_EXTENSION => Ok(path),
        Some(_) => Err(ArgsError::BadOutputName(path)),
    }
}
