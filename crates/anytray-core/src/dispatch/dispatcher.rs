use crate::{CommandChannel, IndicatorRenderer, IndicatorState, RecognizedStates};

use tracing::{debug, error, info};

/// Outcome of one [`CommandDispatcher::drain`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Commands that resolved to a state and were rendered.
    pub applied: usize,
    /// Commands that were unrecognized or failed to render.
    pub discarded: usize,
}

/// Turns queued commands into indicator updates.
///
/// The dispatcher owns the current [`IndicatorState`] and is the only writer
/// of it. It never blocks: each [`drain`](Self::drain) consumes what is
/// pending and returns. Callers run a drain whenever the channel reports
/// [`ChannelEvent::Enqueued`](crate::ChannelEvent::Enqueued); because the
/// notification fires after the item is visible, an item that arrives just
/// after a drain finishes is picked up by the next one.
pub struct CommandDispatcher<R> {
    channel: CommandChannel<String>,
    recognized: RecognizedStates,
    renderer: R,
    current: IndicatorState,
}

impl<R: IndicatorRenderer> CommandDispatcher<R> {
    /// Create a dispatcher whose indicator currently shows `initial`.
    pub fn new(
        channel: CommandChannel<String>,
        recognized: RecognizedStates,
        renderer: R,
        initial: IndicatorState,
    ) -> Self {
        Self {
            channel,
            recognized,
            renderer,
            current: initial,
        }
    }

    /// State most recently rendered.
    pub fn current(&self) -> &IndicatorState {
        &self.current
    }

    /// The presentation layer the dispatcher renders into.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer for presentation-only updates.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Apply every pending command in arrival order.
    pub fn drain(&mut self) -> DrainSummary {
        let mut summary = DrainSummary::default();

        while self.channel.count() > 0 {
            let command = match self.channel.dequeue() {
                Ok(c) => c,
                // Another consumer emptied the queue between count and dequeue.
                Err(_) => break,
            };

            if self.apply(&command) {
                summary.applied += 1;
            } else {
                summary.discarded += 1;
            }
        }

        if summary != DrainSummary::default() {
            debug!(
                applied = summary.applied,
                discarded = summary.discarded,
                current = %self.current,
                "Command queue drained"
            );
        }

        summary
    }

    fn apply(&mut self, command: &str) -> bool {
        let Some(state) = self.recognized.resolve(command) else {
            debug!(command, "Unrecognized command discarded");
            return false;
        };

        match self.renderer.render(&state) {
            Ok(()) => {
                info!(state = %state, "Indicator state changed");
                self.current = state;
                true
            }
            Err(e) => {
                error!(state = %state, error = %e, "Failed to render indicator state");
                false
            }
        }
    }
}
