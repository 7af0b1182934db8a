//! Structural characters of a chat message.
//!
//! These are the only non-whitespace characters the scanner treats specially: the backtick opens and closes a
//! code fence, parentheses group a multi-word subject, and `@` decorates a mention.
//!
//! ## Examples
//! ```rust
//! use popple_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_char('`'), Some(PunctuationId::Backtick));
//! assert_eq!(punctuation::as_char(PunctuationId::LParen), '(');
//! ```

/// Stable identifier for structural characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Backtick,
    LParen,
    RParen,
    At,
}

/// Metadata for a structural character.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: char,
}

/// Registry of all structural characters.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Backtick, '`'),
    info(PunctuationId::LParen, '('),
    info(PunctuationId::RParen, ')'),
    info(PunctuationId::At, '@'),
];

/// Return the character for `id`.
pub fn as_char(id: PunctuationId) -> char {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.canonical)
        .expect("punctuation info missing")
}

/// Resolve a character to its structural id.
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == c).map(|p| p.id)
}

/// Whether `c` is the structural character `id`.
pub fn is(c: char, id: PunctuationId) -> bool {
    from_char(c) == Some(id)
}

const fn info(id: PunctuationId, canonical: char) -> PunctuationInfo {
    PunctuationInfo { id, canonical }
}
