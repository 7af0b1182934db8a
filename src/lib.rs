#![forbid(unsafe_code)]
//! Popple: karma subjects from chat messages.
//!
//! A chat message like `Popple++ (a bird)-- thanks` names subjects and nudges their karma up or down. This crate
//! is the facade over the two workspace crates that do the work, plus the application configuration and the
//! `popple` command-line tool.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **Scanner**: `popple_syntax` has no error path at all; malformed messages resolve to fewer subjects.

pub mod cli;
pub mod config;

pub use config::{AppConfig, ConfigError};

pub use popple_core::karma::{self, BoardOrder, Levels};
pub use popple_syntax::{
    Lexer, OperatorMode, ParseConfig, Subject, Token, TokenKind, aggregate, lex, parse_subjects, parse_subjects_with,
};
