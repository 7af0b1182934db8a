//! Shared, pure karma vocabulary and arithmetic for Popple.
//!
//! This crate is intentionally small and dependency-free. It holds the pieces that both the message scanner
//! (`popple_syntax`) and the surrounding bot need to agree on:
//! - the spellings of karma operators and the structural characters of a chat message (`lang`), and
//! - the arithmetic applied to resolved subjects: tallying, bumping stored levels, ranking boards (`karma`).
//!
//! ## Notes
//!
//! - No IO, no global state, no logging. Callers own persistence and announcement policy.

pub mod karma;
pub mod lang;

pub use karma::{BoardOrder, Levels};
