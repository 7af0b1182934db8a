//! Matching-paren lookup for the lexer.
//!
//! The `InParen` state needs to know where an opening paren closes, counting nested parens. Scanning ahead
//! with a depth counter from every `(` is quadratic on input like `((((((`, where each paren is unmatched
//! and every retry walks to the end of the message. Instead the first `(` builds a table for the rest of
//! the message in one pass, and every later `(` is a lookup.

use std::collections::HashMap;

use popple_core::lang::punctuation::{self, PunctuationId};

/// Closing-paren offsets, keyed by opening-paren offset.
#[derive(Debug, Default)]
pub(super) struct ParenTable {
    closers: HashMap<usize, usize>,
}

impl ParenTable {
    /// Pair every paren in `source[from..]`.
    ///
    /// A `)` with no open paren is ignored, exactly as a depth counter started at a later `(` would never see
    /// it. Opens still on the stack at the end are unmatched.
    pub(super) fn build(source: &str, from: usize) -> Self {
        let mut closers = HashMap::new();
        let mut open: Vec<usize> = Vec::new();

        for (offset, c) in source[from..].char_indices() {
            match punctuation::from_char(c) {
                Some(PunctuationId::LParen) => open.push(from + offset),
                Some(PunctuationId::RParen) => {
                    if let Some(start) = open.pop() {
                        closers.insert(start, from + offset);
                    }
                }
                _ => {}
            }
        }

        Self { closers }
    }

    /// Offset of the `)` closing the `(` at `open`, if it is closed at all.
    pub(super) fn closing(&self, open: usize) -> Option<usize> {
        self.closers.get(&open).copied()
    }
}
