//! Chat message scanner for Popple: lexer and karma subject resolver.
//!
//! This crate is pure: it does no IO, keeps no state between calls, and never fails. Every message, however
//! malformed, resolves to a (possibly empty) list of subjects. It is safe to call concurrently from any number
//! of message-handling workers.
//!
//! ## Notes
//! - Persistence, aggregation over time, and announcement policy belong to the caller.
//! - Vocabulary (operator spellings, fence and paren characters) comes from `popple_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use popple_syntax::{aggregate, parse_subjects};
//!
//! let subjects = parse_subjects("a++ b-- c++ c++");
//! let levels = aggregate(&subjects);
//! assert_eq!(levels.get("c"), 2);
//! ```
//!
//! ## See also
//! - `popple_core::karma` for bumping stored levels and ranking boards.

pub mod config;
pub mod lexer;
pub mod subject;

pub use config::{OperatorMode, ParseConfig};
pub use lexer::{Lexer, Token, TokenKind, lex};
pub use subject::{Subject, aggregate, parse_subjects, parse_subjects_with, resolve};
