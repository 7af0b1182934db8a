//! Application configuration for Popple
//!
//! The config file is line oriented: one `key value` pair per line. Blank lines and lines starting with `#`
//! are ignored.
//!
//! ```text
//! # show the top 5 by default
//! board_limit 5
//! operators pairwise
//! strip_mention_in_parens yes
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use popple_syntax::{OperatorMode, ParseConfig};
use thiserror::Error;

/// Default number of entries on a karma board.
pub const DEFAULT_BOARD_LIMIT: usize = 10;

/// Errors that occur while loading a config file
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown config key `{key}` on line {line}")]
    #[diagnostic(
        code(popple::config::unknown_key),
        help("known keys: board_limit, operators, strip_mention_in_parens, keep_unscored")
    )]
    UnknownKey { line: usize, key: String },

    #[error("missing value for config key `{key}` on line {line}")]
    #[diagnostic(code(popple::config::missing_value))]
    MissingValue { line: usize, key: String },

    #[error("invalid value `{value}` for config key `{key}` on line {line}: expected {expected}")]
    #[diagnostic(code(popple::config::invalid_value))]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("could not read config file {}", .path.display())]
    #[diagnostic(code(popple::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Popple configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Subject resolution options
    pub parse: ParseConfig,
    /// Number of entries shown on a board when no limit is given
    pub board_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            board_limit: DEFAULT_BOARD_LIMIT,
        }
    }
}

impl AppConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse(mut self, parse: ParseConfig) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_board_limit(mut self, limit: usize) -> Self {
        self.board_limit = limit;
        self
    }

    /// Parse config text. Keys not present keep their defaults.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line_no = index + 1;
            let mut words = line.split_whitespace();
            let Some(key) = words.next() else {
                continue;
            };
            let Some(value) = words.next() else {
                return Err(ConfigError::MissingValue {
                    line: line_no,
                    key: key.to_string(),
                });
            };
            config.apply(line_no, key, value)?;
        }

        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&text)
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected: &'static str| ConfigError::InvalidValue {
            line,
            key: key.to_string(),
            value: value.to_string(),
            expected,
        };

        match key {
            "board_limit" => {
                let limit: usize = value.parse().map_err(|_| invalid("a positive integer"))?;
                if limit == 0 {
                    return Err(invalid("a positive integer"));
                }
                self.board_limit = limit;
            }
            "operators" => {
                let mode = OperatorMode::from_name(value).ok_or_else(|| invalid("`trailing` or `pairwise`"))?;
                self.parse.operator_mode = mode;
            }
            "strip_mention_in_parens" => {
                self.parse.strip_mention_in_parens = parse_switch(value).ok_or_else(|| invalid(SWITCH))?;
            }
            "keep_unscored" => {
                self.parse.keep_unscored = parse_switch(value).ok_or_else(|| invalid(SWITCH))?;
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    line,
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}

const SWITCH: &str = "on/yes/true or off/no/false";

fn parse_switch(value: &str) -> Option<bool> {
    match value {
        "on" | "yes" | "true" => Some(true),
        "off" | "no" | "false" => Some(false),
        _ => None,
    }
}
