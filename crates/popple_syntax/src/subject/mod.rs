//! Karma subject resolution.
//!
//! Maps each lexer token to a subject name and a karma delta by looking at its trailing operator characters.
//! Resolution never fails: a token that looks like a subject but carries no valid operator resolves with a
//! delta of `0`, and a token whose name would be empty (a bare `++`, an empty `()`) is dropped.
//!
//! ## Examples
//! ```rust
//! use popple_syntax::subject::{Subject, parse_subjects};
//!
//! let subjects = parse_subjects("Popple++ (a bird)-- `c++`");
//! assert_eq!(subjects, vec![Subject::new("Popple", 1), Subject::new("a bird", -1)]);
//! ```

mod suffix;

use popple_core::karma::{self, Levels};

use crate::config::ParseConfig;
use crate::lexer::{Lexer, Token, TokenKind};

use suffix::{split_operators, strip_mention};

/// A named entity and the karma change a message applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subject<'a> {
    /// Never empty.
    pub name: &'a str,
    pub delta: i64,
}

impl<'a> Subject<'a> {
    pub fn new(name: &'a str, delta: i64) -> Self {
        Self { name, delta }
    }

    /// Whether this subject carries a karma change at all.
    pub fn is_scored(&self) -> bool {
        self.delta != 0
    }
}

/// Resolve one token into a subject.
///
/// Returns `None` when the token names nothing, or when it is unscored and `config.keep_unscored` is off.
pub fn resolve<'a>(token: &Token<'a>, config: &ParseConfig) -> Option<Subject<'a>> {
    let (name, delta) = match token.kind {
        TokenKind::Plain => resolve_plain(token, config),
        TokenKind::Parenthesized => resolve_parenthesized(token, config),
    };

    if name.is_empty() || (delta == 0 && !config.keep_unscored) {
        return None;
    }
    Some(Subject::new(name, delta))
}

fn resolve_plain<'a>(token: &Token<'a>, config: &ParseConfig) -> (&'a str, i64) {
    let text = strip_mention(token.text);
    if !token.boundary.separates() {
        // `a++` glued to a code fence: the operator is not followed by whitespace or end of input.
        return (text, 0);
    }
    let (name, ops) = split_operators(text, config.operator_mode);
    (name, karma::net_karma(ops))
}

fn resolve_parenthesized<'a>(token: &Token<'a>, config: &ParseConfig) -> (&'a str, i64) {
    let mut name = token.content();
    if config.strip_mention_in_parens {
        name = strip_mention(name);
    }

    // A token lexed in pairwise mode may carry more pairs than trailing-pair resolution accepts.
    let (rest, ops) = split_operators(token.trailing, config.operator_mode);
    let delta = if rest.is_empty() { karma::net_karma(ops) } else { 0 };
    (name, delta)
}

/// Parse every karma subject in `message`, left to right, with the default configuration.
///
/// Duplicate names are reported once per occurrence; use [`aggregate`] to sum them.
pub fn parse_subjects(message: &str) -> Vec<Subject<'_>> {
    parse_subjects_with(message, &ParseConfig::default())
}

/// Parse every karma subject in `message` using `config`.
#[tracing::instrument(skip_all, fields(message_len = message.len()))]
pub fn parse_subjects_with<'a>(message: &'a str, config: &ParseConfig) -> Vec<Subject<'a>> {
    let subjects: Vec<Subject<'a>> = Lexer::new(message)
        .with_operator_mode(config.operator_mode)
        .filter_map(|token| resolve(&token, config))
        .inspect(|subject| tracing::trace!(name = subject.name, delta = subject.delta, "subject"))
        .collect();
    tracing::debug!(count = subjects.len(), "parsed subjects");
    subjects
}

/// Sum deltas per subject name.
///
/// Net-zero names are kept; call [`Levels::without_net_zero`] before announcing.
pub fn aggregate(subjects: &[Subject<'_>]) -> Levels {
    Levels::tally(subjects.iter().map(|s| (s.name, s.delta)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OperatorMode;

    fn scored(message: &str) -> Vec<(&str, i64)> {
        parse_subjects_with(message, &ParseConfig::new().with_keep_unscored(false))
            .into_iter()
            .map(|s| (s.name, s.delta))
            .collect()
    }

    fn pairwise(message: &str) -> Vec<(&str, i64)> {
        let config = ParseConfig::new().with_operator_mode(OperatorMode::Pairwise);
        parse_subjects_with(message, &config)
            .into_iter()
            .map(|s| (s.name, s.delta))
            .collect()
    }

    #[test]
    fn test_simple_increment_and_decrement() {
        assert_eq!(parse_subjects("Popple++"), vec![Subject::new("Popple", 1)]);
        assert_eq!(parse_subjects("iron++"), vec![Subject::new("iron", 1)]);
        assert_eq!(parse_subjects("felt--"), vec![Subject::new("felt", -1)]);
    }

    #[test]
    fn test_multiple_plain_keeps_duplicates_in_order() {
        assert_eq!(
            parse_subjects("a++ b-- c++ c++"),
            vec![
                Subject::new("a", 1),
                Subject::new("b", -1),
                Subject::new("c", 1),
                Subject::new("c", 1),
            ]
        );
    }

    #[test]
    fn test_parens() {
        assert_eq!(parse_subjects("(a bird)--"), vec![Subject::new("a bird", -1)]);
        assert_eq!(
            scored("(a bird)-- (a plane)++ (superman)++"),
            vec![("a bird", -1), ("a plane", 1), ("superman", 1)]
        );
        assert_eq!(
            parse_subjects("((Nested) (sub))++"),
            vec![Subject::new("(Nested) (sub)", 1)]
        );
    }

    #[test]
    fn test_mixed_form() {
        assert_eq!(
            scored("(one hundred suns)++ lamp--"),
            vec![("one hundred suns", 1), ("lamp", -1)]
        );
    }

    #[test]
    fn test_fence_excludes_operators() {
        assert_eq!(parse_subjects("`c++` test++"), vec![Subject::new("test", 1)]);
    }

    #[test]
    fn test_unterminated_fence_keeps_later_subjects() {
        assert_eq!(scored("works++ `(doesn't work)++"), vec![("works", 1), ("doesn't work", 1)]);
        assert_eq!(scored("Good`Bye++"), vec![("Bye", 1)]);
    }

    #[test]
    fn test_unmatched_paren_keeps_later_subjects() {
        let subjects = parse_subjects("(unmatched hello++");
        assert!(subjects.contains(&Subject::new("hello", 1)));
        assert_eq!(scored("(unmatched hello++"), vec![("hello", 1)]);
    }

    #[test]
    fn test_leading_mention_stripped() {
        assert_eq!(parse_subjects("@holdo++"), vec![Subject::new("holdo", 1)]);
        assert_eq!(parse_subjects("@@holdo++"), vec![Subject::new("@holdo", 1)]);
    }

    #[test]
    fn test_mention_in_parens_is_configurable() {
        assert_eq!(parse_subjects("(@holdo)++"), vec![Subject::new("@holdo", 1)]);

        let config = ParseConfig::new().with_strip_mention_in_parens(true);
        assert_eq!(
            parse_subjects_with("(@holdo)++", &config),
            vec![Subject::new("holdo", 1)]
        );
        assert!(parse_subjects_with("(@)++", &config).is_empty());
    }

    #[test]
    fn test_bare_operators_are_not_subjects() {
        assert!(parse_subjects("++").is_empty());
        assert!(parse_subjects("--").is_empty());
        assert!(parse_subjects("()--").is_empty());
        assert!(parse_subjects("@++").is_empty());
    }

    #[test]
    fn test_boundary_rule() {
        assert_eq!(parse_subjects("no++karma"), vec![Subject::new("no++karma", 0)]);
        assert!(scored("no++karma").is_empty());
        // Operator directly before a fence is not followed by whitespace.
        assert_eq!(parse_subjects("a++`x`"), vec![Subject::new("a++", 0)]);
    }

    #[test]
    fn test_unscored_plain_words_are_reported_by_default() {
        assert_eq!(
            parse_subjects("thanks Popple++"),
            vec![Subject::new("thanks", 0), Subject::new("Popple", 1)]
        );
    }

    #[test]
    fn test_partial_suffix_after_paren_is_scanned_again() {
        assert_eq!(parse_subjects("(a)+"), vec![Subject::new("a", 0), Subject::new("+", 0)]);
        assert_eq!(parse_subjects("(a)-"), vec![Subject::new("a", 0), Subject::new("-", 0)]);
        assert_eq!(parse_subjects("(a)+-"), vec![Subject::new("a", 0), Subject::new("+-", 0)]);
    }

    #[test]
    fn test_paren_followed_by_text() {
        assert_eq!(
            parse_subjects("(a)++x"),
            vec![Subject::new("a", 0), Subject::new("++x", 0)]
        );
        assert_eq!(scored("(a)b++"), vec![("b", 1)]);
    }

    #[test]
    fn test_trailing_pair_consumes_one_pair() {
        assert_eq!(parse_subjects("C++++"), vec![Subject::new("C++", 1)]);
        assert_eq!(parse_subjects("(a)+++"), vec![Subject::new("a", 0), Subject::new("+", 1)]);
        assert_eq!(parse_subjects("(a)++++"), vec![Subject::new("a", 0), Subject::new("++", 1)]);
    }

    #[test]
    fn test_resolve_rejects_extra_pairs_in_trailing_pair_mode() {
        let token = Lexer::new("(a)++++")
            .with_operator_mode(OperatorMode::Pairwise)
            .next()
            .unwrap();
        assert_eq!(resolve(&token, &ParseConfig::default()), Some(Subject::new("a", 0)));
    }

    #[test]
    fn test_pairwise_mode() {
        assert_eq!(pairwise("Name++++"), vec![("Name", 2)]);
        assert_eq!(pairwise("Poe----++"), vec![("Poe", -1)]);
        assert_eq!(pairwise("(a b)++++"), vec![("a b", 2)]);
        assert_eq!(pairwise("Poe++--++--"), vec![("Poe", 0)]);
        assert_eq!(pairwise("(a)+++"), vec![("a", 0), ("+", 1)]);
        assert_eq!(pairwise("(a)+-"), vec![("a", 0), ("+-", 0)]);
    }

    #[test]
    fn test_aggregate() {
        let levels = aggregate(&parse_subjects("a++ b-- c++ c++"));
        assert_eq!(levels, Levels::tally([("a", 1), ("b", -1), ("c", 2)]));

        let levels = aggregate(&parse_subjects("Name++ Name--"));
        assert_eq!(levels.get("Name"), 0);
        assert!(levels.without_net_zero().is_empty());
    }

    #[test]
    fn test_degenerate_inputs() {
        for message in ["", "   ", "`", "(", ")", "``", "(((", "```", "@", "+", "-"] {
            let subjects = parse_subjects(message);
            assert!(subjects.iter().all(|s| !s.is_scored()), "{message:?} -> {subjects:?}");
        }
    }
}
