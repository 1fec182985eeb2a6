//! Optional `config.json` with user defaults.
//!
//! ```json
//! {
//!   "equalize": { "reference_note": 60 },
//!   "console": { "debug": false, "color": "auto" }
//! }
//! ```
//!
//! Every section and field may be left out.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use termcolor::ColorChoice;

use crate::error::{ConfigError, Error};
use crate::general::transpose::{DEFAULT_REFERENCE, NOTE_MAX, NOTE_MIN};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "MBSEQ_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub equalize: EqualizeConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EqualizeConfig {
    pub reference_note: u8,
}

impl Default for EqualizeConfig {
    fn default() -> Self {
        Self { reference_note: DEFAULT_REFERENCE }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub debug: bool,
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

impl Config {
    /// Where the config is looked up: `$MBSEQ_CONFIG`, else `config.json`.
    pub fn location() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(Error::Io { path: path.to_path_buf(), source }),
        };
        Self::from_json(&text).map_err(|source| Error::Config { path: path.to_path_buf(), source })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        let note = config.equalize.reference_note;
        if !(NOTE_MIN..=NOTE_MAX).contains(&note) {
            return Err(ConfigError::ReferenceOutOfRange { value: note, min: NOTE_MIN, max: NOTE_MAX });
        }
        Ok(config)
    }
}
