//! Karma arithmetic over resolved subjects.
//!
//! The scanner reports one `(name, delta)` pair per subject occurrence. Everything here works on those pairs
//! or on a [`Levels`] map built from them; none of it knows where the levels are stored.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::lang::operators::{self, OPERATOR_LEN};

/// Karma per subject name.
///
/// Ordered by name so boards and rendered output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Levels(BTreeMap<String, i64>);

impl Levels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum deltas per name, in encounter order.
    ///
    /// Names whose deltas cancel out are kept with a level of `0`; see [`Levels::without_net_zero`].
    pub fn tally<I, S>(increments: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut levels = Self::new();
        for (name, delta) in increments {
            *levels.0.entry(name.into()).or_insert(0) += delta;
        }
        levels
    }

    /// Level for `name`, or `0` when the name has never been seen.
    pub fn get(&self, name: &str) -> i64 {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn set(&mut self, name: impl Into<String>, level: i64) {
        self.0.insert(name.into(), level);
    }

    pub fn remove(&mut self, name: &str) -> Option<i64> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, i64> {
        self.0.iter()
    }

    /// Drop names whose level is exactly zero.
    ///
    /// A message like `Name++ Name--` is a no-op and should not be announced.
    pub fn without_net_zero(mut self) -> Self {
        self.0.retain(|_, level| *level != 0);
        self
    }

    /// Apply `increments` to `self` and return the resulting level of every touched name.
    ///
    /// Zero increments are skipped entirely, so they never create or report a name.
    pub fn bump(&self, increments: &Levels) -> Levels {
        bump(self, increments)
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Levels {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        Self::tally(iter)
    }
}

impl<'a> IntoIterator for &'a Levels {
    type Item = (&'a String, &'a i64);
    type IntoIter = btree_map::Iter<'a, String, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Levels {
    type Item = (String, i64);
    type IntoIter = btree_map::IntoIter<String, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// New levels for every non-zero increment: `current[name] + increment`.
///
/// ## Examples
/// ```rust
/// use popple_core::karma::{self, Levels};
///
/// let current = Levels::tally([("wolf", -1)]);
/// let bumped = karma::bump(&current, &Levels::tally([("wolf", -1), ("dune", 0)]));
/// assert_eq!(bumped.get("wolf"), -2);
/// assert_eq!(bumped.len(), 1);
/// ```
pub fn bump(current: &Levels, increments: &Levels) -> Levels {
    increments
        .iter()
        .filter(|(_, incr)| **incr != 0)
        .map(|(name, incr)| (name.clone(), current.get(name) + incr))
        .collect()
}

/// Count operator pairs left to right, stopping at the first pair that is not an operator.
///
/// This is the "pairwise" reading of a suffix: `++++` is two increments, `----++` nets `-1`.
///
/// ## Examples
/// ```rust
/// use popple_core::karma::net_karma;
///
/// assert_eq!(net_karma("+++"), 1);
/// assert_eq!(net_karma("++--"), 0);
/// assert_eq!(net_karma("++++a++"), 2);
/// assert_eq!(net_karma("+a"), 0);
/// ```
pub fn net_karma(ops: &str) -> i64 {
    let mut net = 0;
    let mut rest = ops;
    while rest.len() >= OPERATOR_LEN {
        let Some(pair) = rest.get(..OPERATOR_LEN) else {
            break;
        };
        let Some(id) = operators::from_str(pair) else {
            break;
        };
        net += operators::delta_of(id);
        rest = &rest[OPERATOR_LEN..];
    }
    net
}

/// Ordering for a karma board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardOrder {
    /// Highest karma first.
    #[default]
    Leaderboard,
    /// Lowest karma first.
    Loserboard,
}

/// Rank `levels` into at most `limit` entries.
///
/// Ties are broken alphabetically so the board is stable between runs.
pub fn rank(levels: &Levels, order: BoardOrder, limit: usize) -> Vec<(String, i64)> {
    let mut board: Vec<(String, i64)> = levels.iter().map(|(name, level)| (name.clone(), *level)).collect();
    board.sort_by(|(a_name, a), (b_name, b)| {
        let by_level = match order {
            BoardOrder::Leaderboard => b.cmp(a),
            BoardOrder::Loserboard => a.cmp(b),
        };
        by_level.then_with(|| a_name.cmp(b_name))
    });
    board.truncate(limit);
    board
}
