//! Lexer for chat messages.
//!
//! Splits free-form message text into the two token kinds a karma subject can come from:
//! - Plain tokens: a maximal run of non-whitespace, non-backtick characters
//! - Parenthesized tokens: a balanced `( ... )` span, plus the operator suffix glued to the closing paren
//!
//! A suffix after `)` is only taken when it is a whole operator followed by whitespace or end of input (one pair
//! in `TrailingPair` mode, a run of whole pairs in `Pairwise` mode). Anything else after the `)` is scanned
//! again as the start of the next token.
//!
//! Whitespace and backtick-fenced spans are discarded. Malformed input (an unterminated fence, an unmatched
//! paren) is never an error: the lexer backtracks one character past the offending delimiter and keeps going.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (Token, TokenKind, Boundary, Span)
//! - `parens` - Matching-paren table used by the `InParen` state

mod parens;
pub mod tokens;

pub use tokens::{Boundary, Span, Token, TokenKind};

use popple_core::lang::operators::{self, OPERATOR_LEN};
use popple_core::lang::punctuation::{self, PunctuationId};

use crate::config::OperatorMode;

use parens::ParenTable;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Lexer state diagram:
//
//                 ┌──── '`' ───→ [InFence] ── closed ───────────┐
//                 │                  └─── unterminated: skip '`' ┤
//                 ├──── '(' ───→ [InParen] ── matched: emit ────┤
//  [ScanStart] ───┤                  └─── unmatched: skip '(' ──┤
//       ↑         ├──── ws ────→ [SkipWhitespace] ──────────────┤
//       │         └──── other ─→ [InPlainToken] ── emit ────────┤
//       └───────────────────────────────────────────────────────┘
//
// Every arrow back to ScanStart leaves `pos` strictly past where the state started.
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ScanStart,
    SkipWhitespace,
    InFence,
    InPlainToken,
    InParen,
}

/// Outcome of running one state.
enum Step<'a> {
    Goto(State),
    Emit(Token<'a>, State),
    Stop,
}

/// Lexer for a single chat message.
///
/// The lexer is an [`Iterator`] over [`Token`]s: lazy, finite, and not restartable. Use [`lex`] to collect
/// every token at once.
pub struct Lexer<'a> {
    source: &'a str,
    /// Start of the span currently being scanned.
    start: usize,
    /// Cursor. Invariant: `start <= pos <= source.len()`.
    pos: usize,
    /// `None` once the input is exhausted.
    state: Option<State>,
    parens: Option<ParenTable>,
    operator_mode: OperatorMode,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given message text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            pos: 0,
            state: Some(State::ScanStart),
            parens: None,
            operator_mode: OperatorMode::default(),
        }
    }

    /// Set how many operator pairs a closing paren may carry.
    pub fn with_operator_mode(mut self, mode: OperatorMode) -> Self {
        self.operator_mode = mode;
        self
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Discard everything scanned so far.
    fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Rewind (or skip) both ends of the scan window to `offset`.
    fn set(&mut self, offset: usize) {
        debug_assert!(offset <= self.source.len());
        self.start = offset;
        self.pos = offset;
    }

    fn boundary(&self) -> Boundary {
        match self.peek() {
            None => Boundary::EndOfInput,
            Some(c) if c.is_whitespace() => Boundary::Whitespace,
            Some(c) if is_fence(c) => Boundary::Fence,
            Some(_) => Boundary::Text,
        }
    }

    // ========================================================================
    // States
    // ========================================================================

    fn step(&mut self, state: State) -> Step<'a> {
        debug_assert!(self.start <= self.pos && self.pos <= self.source.len());
        match state {
            State::ScanStart => self.scan_start(),
            State::SkipWhitespace => self.skip_whitespace(),
            State::InFence => self.in_fence(),
            State::InPlainToken => self.in_plain_token(),
            State::InParen => self.in_paren(),
        }
    }

    fn scan_start(&mut self) -> Step<'a> {
        self.ignore();
        match self.peek() {
            None => Step::Stop,
            Some(c) if is_fence(c) => Step::Goto(State::InFence),
            Some(c) if punctuation::is(c, PunctuationId::LParen) => Step::Goto(State::InParen),
            Some(c) if c.is_whitespace() => Step::Goto(State::SkipWhitespace),
            Some(_) => Step::Goto(State::InPlainToken),
        }
    }

    fn skip_whitespace(&mut self) -> Step<'a> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        self.ignore();
        Step::Goto(State::ScanStart)
    }

    fn in_fence(&mut self) -> Step<'a> {
        let open = self.pos;
        self.advance();

        match self.source[self.pos..].find(is_fence) {
            Some(offset) => {
                // Skip past the closing backtick; the fenced text is never scanned.
                self.pos += offset + punctuation::as_char(PunctuationId::Backtick).len_utf8();
                self.ignore();
            }
            None => {
                tracing::debug!(offset = open, "unterminated code fence, treating backtick as punctuation");
                self.set(self.pos);
            }
        }
        Step::Goto(State::ScanStart)
    }

    fn in_plain_token(&mut self) -> Step<'a> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || is_fence(c) {
                break;
            }
            self.advance();
        }

        let token = Token::plain(
            &self.source[self.start..self.pos],
            Span::new(self.start, self.pos),
            self.boundary(),
        );
        Step::Emit(token, State::ScanStart)
    }

    fn in_paren(&mut self) -> Step<'a> {
        let open = self.pos;
        let Some(close) = self.closing_paren(open) else {
            tracing::debug!(offset = open, "unmatched paren, treating it as punctuation");
            self.set(open + punctuation::as_char(PunctuationId::LParen).len_utf8());
            return Step::Goto(State::ScanStart);
        };

        self.pos = close + punctuation::as_char(PunctuationId::RParen).len_utf8();
        let text_end = self.pos;

        self.pos += self.paren_suffix_len(text_end);

        let token = Token::parenthesized(
            &self.source[self.start..text_end],
            &self.source[text_end..self.pos],
            Span::new(self.start, self.pos),
            self.boundary(),
        );
        Step::Emit(token, State::ScanStart)
    }

    /// Length of the operator suffix glued to a `)` ending at `end`, or `0` when what follows belongs to the
    /// next scan.
    fn paren_suffix_len(&self, end: usize) -> usize {
        let rest = &self.source[end..];
        let mut len = 0;
        while rest.get(len..len + OPERATOR_LEN).and_then(operators::from_str).is_some() {
            len += OPERATOR_LEN;
            if self.operator_mode == OperatorMode::TrailingPair {
                break;
            }
        }

        let separated = rest[len..].chars().next().is_none_or(char::is_whitespace);
        if separated { len } else { 0 }
    }

    fn closing_paren(&mut self, open: usize) -> Option<usize> {
        let source = self.source;
        self.parens
            .get_or_insert_with(|| ParenTable::build(source, open))
            .closing(open)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while let Some(state) = self.state {
            match self.step(state) {
                Step::Goto(next) => self.state = Some(next),
                Step::Emit(token, next) => {
                    self.state = Some(next);
                    tracing::trace!(kind = ?token.kind, text = token.text, "token");
                    return Some(token);
                }
                Step::Stop => self.state = None,
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

// ============================================================================
// Helper functions
// ============================================================================

fn is_fence(c: char) -> bool {
    punctuation::is(c, PunctuationId::Backtick)
}

/// Convenience function to lex a message.
///
/// This is a shorthand for `Lexer::new(message).collect()`.
#[tracing::instrument(skip_all, fields(message_len = message.len()))]
pub fn lex(message: &str) -> Vec<Token<'_>> {
    Lexer::new(message).collect()
}

// ============================================================================
// TESTS
// ============================================================================
