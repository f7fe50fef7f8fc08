mod channel;
mod dispatch;

use crate::{IndicatorRenderer, IndicatorState};

use std::sync::{Arc, Mutex};

/// Renderer that records every state it is asked to show.
#[derive(Clone, Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) rendered: Arc<Mutex<Vec<IndicatorState>>>,
    pub(crate) fail_on: Option<String>,
}

impl RecordingRenderer {
    pub(crate) fn failing_on(name: &str) -> Self {
        Self {
            rendered: Arc::default(),
            fail_on: Some(name.to_string()),
        }
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.rendered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }
}

impl IndicatorRenderer for RecordingRenderer {
    type Error = String;

    fn render(&mut self, state: &IndicatorState) -> Result<(), String> {
        if self.fail_on.as_deref() == Some(state.name()) {
            return Err(format!("cannot render {}", state));
        }
        self.rendered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(state.clone());
        Ok(())
    }
}
