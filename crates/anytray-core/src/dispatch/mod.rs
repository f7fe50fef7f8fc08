mod dispatcher;
mod indicator_state;
mod recognized_states;
mod renderer;

pub use {
    dispatcher::{CommandDispatcher, DrainSummary},
    indicator_state::IndicatorState,
    recognized_states::{DEFAULT_STATE_NAMES, RecognizedStates},
    renderer::IndicatorRenderer,
};
