use crate::IndicatorState;

use std::collections::BTreeSet;

/// State names accepted when no set is configured.
pub const DEFAULT_STATE_NAMES: [&str; 11] = [
    "black",
    "blue",
    "cyan",
    "exclamation",
    "green",
    "orange",
    "purple",
    "question",
    "red",
    "white",
    "yellow",
];

/// The set of command strings that resolve to an [`IndicatorState`].
///
/// Matching is exact: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedStates {
    names: BTreeSet<String>,
}

impl RecognizedStates {
    /// Build a set from state names. Duplicates collapse.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve a command to a state, or `None` if it is not recognized.
    pub fn resolve(&self, command: &str) -> Option<IndicatorState> {
        self.names
            .contains(command)
            .then(|| IndicatorState::new(command))
    }

    /// Whether `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of recognized states.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no state is recognized.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Recognized names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for RecognizedStates {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_NAMES)
    }
}
