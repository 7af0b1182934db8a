//! Parsing options for the subject resolver.
//!
//! Three details of subject resolution are caller policy rather than syntax: mentions inside parens, unscored
//! subjects, and how many trailing operators count. Each one is a switch here.

/// How many trailing operators count toward a subject's delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorMode {
    /// Exactly one trailing `++` or `--`; the delta is always -1, 0 or +1.
    #[default]
    TrailingPair,
    /// Every trailing operator pair counts: `Name++++` is +2 and `Name----++` is -1.
    Pairwise,
}

impl OperatorMode {
    /// Resolve a configuration spelling (`trailing` or `pairwise`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "trailing" => Some(OperatorMode::TrailingPair),
            "pairwise" => Some(OperatorMode::Pairwise),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperatorMode::TrailingPair => "trailing",
            OperatorMode::Pairwise => "pairwise",
        }
    }
}

/// Subject resolution configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Strip a leading `@` from parenthesized subjects too (plain subjects always strip it)
    pub strip_mention_in_parens: bool,
    /// Report subjects whose delta is zero instead of dropping them
    pub keep_unscored: bool,
    pub operator_mode: OperatorMode,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            strip_mention_in_parens: false,
            keep_unscored: true,
            operator_mode: OperatorMode::TrailingPair,
        }
    }
}

impl ParseConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strip_mention_in_parens(mut self, strip: bool) -> Self {
        self.strip_mention_in_parens = strip;
        self
    }

    pub fn with_keep_unscored(mut self, keep: bool) -> Self {
        self.keep_unscored = keep;
        self
    }

    pub fn with_operator_mode(mut self, mode: OperatorMode) -> Self {
        self.operator_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert!(!config.strip_mention_in_parens);
        assert!(config.keep_unscored);
        assert_eq!(config.operator_mode, OperatorMode::TrailingPair);
        assert_eq!(ParseConfig::new(), config);
    }

    #[test]
    fn test_builder_chain() {
        let config = ParseConfig::new()
            .with_strip_mention_in_parens(true)
            .with_keep_unscored(false)
            .with_operator_mode(OperatorMode::Pairwise);

        assert!(config.strip_mention_in_parens);
        assert!(!config.keep_unscored);
        assert_eq!(config.operator_mode, OperatorMode::Pairwise);
    }

    #[test]
    fn test_operator_mode_names() {
        for mode in [OperatorMode::TrailingPair, OperatorMode::Pairwise] {
            assert_eq!(OperatorMode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(OperatorMode::from_name("both"), None);
    }
}
