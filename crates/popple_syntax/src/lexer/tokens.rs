//! Token types for the message lexer.
//!
//! Tokens borrow their text from the scanned message; nothing is copied until a caller asks for an owned name.

/// Byte range into the scanned message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A maximal run of non-whitespace, non-backtick characters.
    Plain,
    /// A balanced `( ... )` span, possibly followed by an operator suffix.
    Parenthesized,
}

/// What the lexer found directly after a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Whitespace,
    EndOfInput,
    /// A backtick, i.e. the start of a (possibly unterminated) code fence.
    Fence,
    /// Any other character. Only a parenthesized token can be followed by text.
    Text,
}

impl Boundary {
    /// Whether an operator directly before this boundary counts.
    pub fn separates(self) -> bool {
        matches!(self, Boundary::Whitespace | Boundary::EndOfInput)
    }
}

/// A token with its kind, raw text, and position in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw token text. For `Parenthesized` this is the balanced span including the outer parens.
    pub text: &'a str,
    /// Operator suffix glued to the closing paren, taken only when whitespace or end of input follows it.
    /// Always empty for `Plain`.
    pub trailing: &'a str,
    /// Covers `text` and `trailing`.
    pub span: Span,
    pub boundary: Boundary,
}

impl<'a> Token<'a> {
    pub fn plain(text: &'a str, span: Span, boundary: Boundary) -> Self {
        Self {
            kind: TokenKind::Plain,
            text,
            trailing: "",
            span,
            boundary,
        }
    }

    pub fn parenthesized(text: &'a str, trailing: &'a str, span: Span, boundary: Boundary) -> Self {
        Self {
            kind: TokenKind::Parenthesized,
            text,
            trailing,
            span,
            boundary,
        }
    }

    /// Text between the outer parens of a `Parenthesized` token, or the whole text of a `Plain` one.
    pub fn content(&self) -> &'a str {
        match self.kind {
            TokenKind::Plain => self.text,
            TokenKind::Parenthesized => {
                // A parenthesized token always starts with `(` and ends with `)`, both one byte.
                self.text.get(1..self.text.len() - 1).unwrap_or_default()
            }
        }
    }
}
