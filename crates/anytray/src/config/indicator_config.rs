use crate::config::{StateStyle, default_initial_state};

use anytray_core::{IndicatorState, RecognizedStates};
use serde::{Deserialize, Serialize};

fn default_states() -> Vec<StateStyle> {
    StateStyle::defaults()
}

/// Indicator vocabulary and appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// State shown before the first command arrives.
    #[serde(default = "default_initial_state")]
    pub initial_state: String,
    /// Every state a command may select.
    #[serde(default = "default_states")]
    pub states: Vec<StateStyle>,
}

impl IndicatorConfig {
    /// Names the dispatcher accepts.
    pub fn recognized(&self) -> RecognizedStates {
        RecognizedStates::new(self.states.iter().map(|s| s.name.clone()))
    }

    /// The configured start-up state.
    pub fn initial(&self) -> IndicatorState {
        IndicatorState::new(self.initial_state.clone())
    }

    /// Style for a state name, if configured.
    pub fn style(&self, name: &str) -> Option<&StateStyle> {
        self.states.iter().find(|s| s.name == name)
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            initial_state: default_initial_state(),
            states: default_states(),
        }
    }
}
