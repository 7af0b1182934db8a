//! Splitting operator suffixes off subject text.

use popple_core::lang::operators::{self, OPERATOR_LEN};
use popple_core::lang::punctuation::{self, PunctuationId};

use crate::config::OperatorMode;

/// Split `text` into `(name, operators)` where `operators` is the trailing operator run `mode` accepts.
///
/// `operators` is empty when `text` has no operator suffix. In `TrailingPair` mode it holds at most one pair.
pub(super) fn split_operators(text: &str, mode: OperatorMode) -> (&str, &str) {
    let mut name = text;
    while operators::suffix_of(name).is_some() {
        name = &name[..name.len() - OPERATOR_LEN];
        if mode == OperatorMode::TrailingPair {
            break;
        }
    }
    (name, &text[name.len()..])
}

/// Drop a single leading mention decoration.
pub(super) fn strip_mention(text: &str) -> &str {
    text.strip_prefix(punctuation::as_char(PunctuationId::At)).unwrap_or(text)
}
