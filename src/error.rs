//! Error types shared by the parser, the transforms and the command line.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed `.mbseq` content. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line} is empty")]
    EmptyLine { line: usize },

    #[error("line {line} has no '<index>:' prefix")]
    MissingSeparator { line: usize },

    #[error("line {line} holds no steps")]
    NoSteps { line: usize },

    #[error("line {line}: note {value} is outside the MIDI range 0..=127")]
    NoteOutOfRange { line: usize, value: String },

    #[error("expected 8 sequences, found {found}")]
    SequenceCount { found: usize },
}

/// A shift that would push a note outside the playable range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Transpose would exceed MIDI value {limit} (note {note} shifted by {semitones})")]
    Upper { note: u8, semitones: i32, limit: u8 },

    #[error("Transpose would undercut MIDI value {limit} (note {note} shifted by {semitones})")]
    Lower { note: u8, semitones: i32, limit: u8 },

    #[error("Sequence holds only rests, there is no note to equalize against")]
    NoAnchor,
}

/// A transpose-mode batch aborted on one sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sequence {index}: {source}")]
pub struct BatchError {
    pub index: u8,
    #[source]
    pub source: RangeError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Invalid sequence choice {0}, must be numbers between 1 to 8")]
    OutOfRange(i64),

    #[error("Invalid sequence choice, {0} is listed more than once")]
    Duplicate(u8),

    #[error("Invalid sequence choice, the index list is empty")]
    Empty,
}

/// Rejected command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Invalid file type. This works with *.mbseq files generated with the MicroBrute Connection software")]
    BadExtension(PathBuf),

    #[error("Output must be a *.mbseq file. If no file ending is specified, .mbseq will be added automatically")]
    BadOutputName(PathBuf),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Reference must be between {min} and {max}, got {value}")]
    ReferenceOutOfRange { value: i64, min: u8, max: u8 },

    #[error("Transpose mode needs a semitone amount, pass it with -r")]
    MissingSemitones,

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Expected a number for {flag}, got '{value}'")]
    NotANumber { flag: String, value: String },

    #[error("Unknown argument '{0}'")]
    Unknown(String),

    #[error("No source file given")]
    MissingSource,
}

/// Unusable `config.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("equalize.reference_note must be between {min} and {max}, got {value}")]
    ReferenceOutOfRange { value: u8, min: u8, max: u8 },
}

/// Top-level error of one run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error("config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
