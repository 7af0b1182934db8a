#![no_main]

use libfuzzer_sys::fuzz_target;
use popple::{OperatorMode, ParseConfig, lex, parse_subjects_with};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let mut last_end = 0;
        for token in lex(s) {
            assert!(!token.span.is_empty(), "empty token in {s:?}");
            assert!(token.span.start >= last_end, "token went backwards in {s:?}");
            last_end = token.span.end;
        }

        for mode in [OperatorMode::TrailingPair, OperatorMode::Pairwise] {
            let config = ParseConfig::new().with_operator_mode(mode);
            for subject in parse_subjects_with(s, &config) {
                assert!(!subject.name.is_empty());
            }
        }
    }
});
