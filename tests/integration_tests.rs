//! End-to-end scenarios through the public `popple` facade.

use popple::karma::{self, BoardOrder};
use popple::{AppConfig, Levels, OperatorMode, ParseConfig, Subject, aggregate, parse_subjects, parse_subjects_with};

fn scored(message: &str) -> Vec<Subject<'_>> {
    parse_subjects_with(message, &ParseConfig::new().with_keep_unscored(false))
}

#[test]
fn single_increment() {
    assert_eq!(parse_subjects("Popple++"), vec![Subject::new("Popple", 1)]);
}

#[test]
fn several_subjects_and_their_tally() {
    let subjects = parse_subjects("a++ b-- c++ c++");
    assert_eq!(
        subjects,
        vec![
            Subject::new("a", 1),
            Subject::new("b", -1),
            Subject::new("c", 1),
            Subject::new("c", 1),
        ]
    );
    assert_eq!(aggregate(&subjects), Levels::tally([("a", 1), ("b", -1), ("c", 2)]));
}

#[test]
fn parenthesized_subject() {
    assert_eq!(parse_subjects("(a bird)--"), vec![Subject::new("a bird", -1)]);
}

#[test]
fn nested_parenthesized_subject() {
    assert_eq!(
        parse_subjects("((Nested) (sub))++"),
        vec![Subject::new("(Nested) (sub)", 1)]
    );
}

#[test]
fn characters_after_a_closing_paren_are_scanned_next() {
    let cases = [
        ("(a)+", vec![Subject::new("a", 0), Subject::new("+", 0)]),
        ("(a)+++", vec![Subject::new("a", 0), Subject::new("+", 1)]),
        ("(a)++++", vec![Subject::new("a", 0), Subject::new("++", 1)]),
        ("(a)+-", vec![Subject::new("a", 0), Subject::new("+-", 0)]),
    ];
    for (message, expected) in cases {
        assert_eq!(parse_subjects(message), expected, "{message:?}");
    }

    let pairwise = ParseConfig::new().with_operator_mode(OperatorMode::Pairwise);
    assert_eq!(parse_subjects_with("(a)++++", &pairwise), vec![Subject::new("a", 2)]);
}

#[test]
fn fenced_operator_is_ignored() {
    assert_eq!(parse_subjects("`c++` test++"), vec![Subject::new("test", 1)]);
}

#[test]
fn unmatched_paren_does_not_suppress_later_subject() {
    assert!(parse_subjects("(unmatched hello++").contains(&Subject::new("hello", 1)));
}

#[test]
fn mention_is_stripped() {
    assert_eq!(parse_subjects("@holdo++"), vec![Subject::new("holdo", 1)]);
}

#[test]
fn boundary_rule() {
    assert!(scored("no++karma").is_empty());
    assert!(!parse_subjects("no++karma").contains(&Subject::new("no", 1)));
}

#[test]
fn net_zero_message_is_not_announced() {
    let levels = aggregate(&parse_subjects("Name++ Name--")).without_net_zero();
    assert!(levels.is_empty());
}

#[test]
fn pairwise_is_opt_in() {
    assert_eq!(parse_subjects("Name++++"), vec![Subject::new("Name++", 1)]);

    let config = ParseConfig::new().with_operator_mode(OperatorMode::Pairwise);
    assert_eq!(parse_subjects_with("Name++++", &config), vec![Subject::new("Name", 2)]);
}

#[test]
fn config_file_drives_parsing_and_boards() {
    let config = AppConfig::parse("board_limit 1\noperators pairwise\nkeep_unscored no\n").unwrap();

    let increments = aggregate(&parse_subjects_with("thanks rust++++ go--", &config.parse));
    let stored = Levels::tally([("go", 4)]);
    let bumped = karma::bump(&stored, &increments);
    assert_eq!(bumped, Levels::tally([("rust", 2), ("go", 3)]));

    let board = karma::rank(&bumped, BoardOrder::Leaderboard, config.board_limit);
    assert_eq!(board, vec![("go".to_string(), 3)]);
}

#[test]
fn subjects_can_be_parsed_from_many_threads() {
    let messages = ["a++ b--", "(x y)++", "`z++` w--", "(broken q++"];
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let message = messages[i % messages.len()];
            std::thread::spawn(move || {
                parse_subjects(message)
                    .into_iter()
                    .map(|s| (s.name.to_string(), s.delta))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let got = handle.join().unwrap();
        let want: Vec<_> = parse_subjects(messages[i % messages.len()])
            .into_iter()
            .map(|s| (s.name.to_string(), s.delta))
            .collect();
        assert_eq!(got, want);
    }
}
