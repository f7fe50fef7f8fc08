use std::fmt;

/// Semantic state currently shown by the indicator, such as `green` or
/// `exclamation`.
///
/// Only [`RecognizedStates`](crate::RecognizedStates) produces values from
/// network input, so a state always names an entry of the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorState {
    name: String,
}

impl IndicatorState {
    /// Wrap a state name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The state's name, exactly as configured.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
