//! Karma operator vocabulary.
//!
//! A karma operator is a two-character suffix that adjusts a subject's karma by one step.
//!
//! ## Notes
//! - Lookup via [`from_str`] is exact; a single `+` or `-` is not an operator.
//! - Every spelling is built from a single repeated [`OperatorInfo::glyph`].
//!
//! ## Examples
//! ```rust
//! use popple_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::as_str(OperatorId::Increment), "++");
//! assert_eq!(operators::from_str("+-"), None);
//! ```

/// Stable identifier for every karma operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Increment,
    Decrement,
}

/// Metadata for a karma operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    pub glyph: char,
    pub delta: i64,
}

/// Registry of all karma operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Increment, "++", '+', 1),
    op(OperatorId::Decrement, "--", '-', -1),
];

/// Byte length shared by every operator spelling.
pub const OPERATOR_LEN: usize = 2;

/// Look up registry metadata for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Return the canonical spelling for `id`.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Return the karma delta applied by `id`.
pub fn delta_of(id: OperatorId) -> i64 {
    info_for(id).delta
}

/// Resolve an exact spelling to its operator.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == spelling).map(|o| o.id)
}

/// Return the operator whose spelling ends `text`, if any.
///
/// ## Examples
/// ```rust
/// use popple_core::lang::operators::{self, OperatorId};
///
/// assert_eq!(operators::suffix_of("Popple++"), Some(OperatorId::Increment));
/// assert_eq!(operators::suffix_of("Popple+"), None);
/// ```
pub fn suffix_of(text: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| text.ends_with(o.canonical)).map(|o| o.id)
}

/// Whether `c` can appear in an operator spelling.
pub fn is_glyph(c: char) -> bool {
    OPERATORS.iter().any(|o| o.glyph == c)
}

const fn op(id: OperatorId, canonical: &'static str, glyph: char, delta: i64) -> OperatorInfo {
    OperatorInfo {
        id,
        canonical,
        glyph,
        delta,
    }
}
