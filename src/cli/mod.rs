//! CLI module for Popple
//!
//! This module provides the command-line interface around the message scanner.
//!
//! ## Commands
//!
//! - `subjects [TEXT]` - List the subjects of one message in discovery order
//! - `tally [TEXT]` - Sum the subjects of one message per name
//! - `board [FILE]` - Replay a log of messages (one per line) and rank the result
//! - `karma [FILE] --names TEXT` - Replay a log and look up the subjects named in TEXT
//! - `--lex TEXT` - Print the token stream (debug)
//!
//! Messages are read from standard input when no text or file is given.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use popple_syntax::OperatorMode;

use crate::config::{AppConfig, ConfigError};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let report = miette::Report::new(err);
        CliError::failure(format!("{report:?}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Karma subjects from chat messages
#[derive(Parser, Debug)]
#[command(name = "popple")]
#[command(version = VERSION)]
#[command(about = "Find karma subjects (name++ / (some name)--) in chat messages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Tokenize a message only (debug)
    #[arg(long = "lex", value_name = "TEXT")]
    pub lex_text: Option<String>,

    /// Configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Count every trailing operator pair (`name++++` is +2)
    #[arg(long, global = true)]
    pub pairwise: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the subjects of one message in discovery order
    Subjects {
        /// Message text (default: read stdin)
        #[arg(value_name = "TEXT")]
        text: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Sum the subjects of one message per name
    Tally {
        /// Message text (default: read stdin)
        #[arg(value_name = "TEXT")]
        text: Option<String>,
        /// Keep names whose karma cancels out
        #[arg(long)]
        all: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a message log (one message per line) and rank the subjects
    Board {
        /// Message log (default: read stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Number of entries to show (default: board_limit from config)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(usize))]
        limit: Option<usize>,
        /// Show the lowest karma first
        #[arg(long)]
        losers: bool,
    },

    /// Replay a message log and show the karma of the subjects named in a message
    Karma {
        /// Message log (default: read stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Message naming the subjects to look up
        #[arg(long, value_name = "TEXT")]
        names: String,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Initialize structured logging with env-based filter, defaulting to warn (debug with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .try_init();
}

/// Build the effective configuration from `--config` and the global flags.
fn load_config(cli: &Cli) -> CliResult<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if cli.pairwise {
        config.parse.operator_mode = OperatorMode::Pairwise;
    }
    Ok(config)
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = load_config(&cli)?;

    // Handle debug flags first
    if let Some(text) = cli.lex_text {
        return commands::lex_message(&text);
    }

    match cli.command {
        Some(Command::Subjects { text, json }) => {
            let message = commands::read_message(text)?;
            commands::subjects(&message, &config, json)
        }
        Some(Command::Tally { text, all, json }) => {
            let message = commands::read_message(text)?;
            commands::tally(&message, &config, all, json)
        }
        Some(Command::Board { file, limit, losers }) => {
            let log = commands::read_log(file.as_deref())?;
            let limit = limit.unwrap_or(config.board_limit);
            commands::board(&log, &config, limit, losers)
        }
        Some(Command::Karma { file, names }) => {
            let log = commands::read_log(file.as_deref())?;
            commands::karma(&log, &names, &config)
        }
        None => Err(CliError::failure("Error: no command given (try `popple --help`)")),
    }
}

// ============================================================================
// Tests
// ============================================================================
