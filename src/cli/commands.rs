//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Rendering is split from printing: the `render_*` functions are pure and return the exact text a command
//! writes to stdout.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use popple_core::karma::{self, BoardOrder, Levels};
use popple_syntax::{Subject, Token, aggregate, lex, parse_subjects_with};
use serde_json::json;

use super::{CliError, CliResult, ExitCode};
use crate::config::AppConfig;

// ============================================================================
// Input
// ============================================================================

/// The message given on the command line, or all of stdin.
pub fn read_message(text: Option<String>) -> CliResult<String> {
    match text {
        Some(text) => Ok(text),
        None => read_stdin(),
    }
}

/// A message log from `path`, or all of stdin.
pub fn read_log(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e))),
        None => read_stdin(),
    }
}

fn read_stdin() -> CliResult<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| CliError::failure(format!("Error reading stdin: {}", e)))?;
    Ok(buf)
}

// ============================================================================
// Commands
// ============================================================================

/// Print the token stream of a message (debug).
pub fn lex_message(message: &str) -> CliResult<ExitCode> {
    print!("{}", render_tokens(&lex(message)));
    Ok(ExitCode::SUCCESS)
}

/// Print every subject of a message in discovery order.
pub fn subjects(message: &str, config: &AppConfig, json: bool) -> CliResult<ExitCode> {
    let subjects = parse_subjects_with(message, &config.parse);
    let out = if json {
        render_subjects_json(&subjects)?
    } else {
        render_subjects(&subjects)
    };
    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

/// Print per-name totals for a message. Net-zero names are dropped unless `all` is set.
pub fn tally(message: &str, config: &AppConfig, all: bool, json: bool) -> CliResult<ExitCode> {
    let levels = tally_levels(message, config, all);
    let out = if json {
        render_levels_json(&levels)?
    } else {
        render_levels(&levels)
    };
    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

/// Replay a message log and print the top `limit` subjects.
pub fn board(log: &str, config: &AppConfig, limit: usize, losers: bool) -> CliResult<ExitCode> {
    let levels = replay(log, config);
    let order = if losers {
        BoardOrder::Loserboard
    } else {
        BoardOrder::Leaderboard
    };
    print!("{}", render_board(&karma::rank(&levels, order, limit)));
    Ok(ExitCode::SUCCESS)
}

/// Replay a message log and print the level of every subject named in `names`.
pub fn karma(log: &str, names: &str, config: &AppConfig) -> CliResult<ExitCode> {
    let levels = replay(log, config);
    let lookups = distinct_names(&parse_subjects_with(names, &config.parse))
        .into_iter()
        .map(|name| (name, levels.get(name)))
        .collect::<Vec<_>>();
    print!("{}", render_statements(&lookups));
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

pub fn tally_levels(message: &str, config: &AppConfig, all: bool) -> Levels {
    let levels = aggregate(&parse_subjects_with(message, &config.parse));
    if all { levels } else { levels.without_net_zero() }
}

/// Subject names in discovery order, each once.
pub fn distinct_names<'a>(subjects: &[Subject<'a>]) -> Vec<&'a str> {
    let mut names: Vec<&'a str> = Vec::new();
    for subject in subjects {
        if !names.contains(&subject.name) {
            names.push(subject.name);
        }
    }
    names
}

/// Apply every line of `log` as one message, in order.
///
/// A subject whose karma returns to exactly zero is forgotten, like the bot's store does.
pub fn replay(log: &str, config: &AppConfig) -> Levels {
    let mut levels = Levels::new();
    for (index, message) in log.lines().enumerate() {
        let increments = aggregate(&parse_subjects_with(message, &config.parse));
        for (name, level) in levels.bump(&increments) {
            if level == 0 {
                levels.remove(&name);
            } else {
                levels.set(name, level);
            }
        }
        tracing::trace!(line = index + 1, subjects = levels.len(), "replayed message");
    }
    tracing::debug!(subjects = levels.len(), "replayed message log");
    levels
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render_tokens(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(|t| {
            format!(
                "{}..{}\t{:?}\t{}{}\t{:?}\n",
                t.span.start, t.span.end, t.kind, t.text, t.trailing, t.boundary
            )
        })
        .collect()
}

pub fn render_subjects(subjects: &[Subject<'_>]) -> String {
    subjects.iter().map(|s| format!("{}\t{:+}\n", s.name, s.delta)).collect()
}

pub fn render_levels(levels: &Levels) -> String {
    levels.iter().map(|(name, level)| format!("{}\t{:+}\n", name, level)).collect()
}

pub fn render_board(board: &[(String, i64)]) -> String {
    board
        .iter()
        .map(|(name, level)| format!("* {} ({} karma)\n", name, level))
        .collect()
}

pub fn render_statements(lookups: &[(&str, i64)]) -> String {
    lookups
        .iter()
        .map(|(name, level)| format!("{} has {} karma\n", name, level))
        .collect()
}

pub fn render_subjects_json(subjects: &[Subject<'_>]) -> CliResult<String> {
    let value = serde_json::Value::Array(
        subjects
            .iter()
            .map(|s| json!({ "name": s.name, "delta": s.delta }))
            .collect(),
    );
    to_json(&value)
}

pub fn render_levels_json(levels: &Levels) -> CliResult<String> {
    let map: serde_json::Map<String, serde_json::Value> =
        levels.iter().map(|(name, level)| (name.clone(), json!(level))).collect();
    to_json(&serde_json::Value::Object(map))
}

fn to_json(value: &serde_json::Value) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .map_err(|e| CliError::failure(format!("Error encoding JSON: {}", e)))
}
