use crate::IndicatorState;

use std::fmt::Display;

/// Presentation capability the dispatcher calls once per recognized command.
pub trait IndicatorRenderer {
    /// Error reported when the state could not be shown.
    type Error: Display;

    /// Show `state`, replacing whatever was shown before.
    fn render(&mut self, state: &IndicatorState) -> Result<(), Self::Error>;
}
