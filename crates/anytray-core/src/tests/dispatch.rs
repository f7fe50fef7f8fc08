use crate::{
    ChannelEvent, CommandChannel, CommandDispatcher, DrainSummary, IndicatorState,
    RecognizedStates, tests::RecordingRenderer,
};

use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

fn dispatcher_with(
    channel: &CommandChannel<String>,
    renderer: RecordingRenderer,
) -> CommandDispatcher<RecordingRenderer> {
    CommandDispatcher::new(
        channel.clone(),
        RecognizedStates::default(),
        renderer,
        IndicatorState::new("blue"),
    )
}

/// WHAT: A recognized command renders exactly once
/// WHY: Each command maps to one indicator update
#[test]
fn given_recognized_command_when_draining_then_rendered_once() {
    // Given: "green" pending
    let channel = CommandChannel::new();
    let renderer = RecordingRenderer::default();
    let mut dispatcher = dispatcher_with(&channel, renderer.clone());
    channel.enqueue("green".to_string());

    // When: Draining
    let summary = dispatcher.drain();

    // Then: One render of green and the state follows
    assert_eq!(renderer.names(), vec!["green"]);
    assert_eq!(dispatcher.current().name(), "green");
    assert_eq!(
        summary,
        DrainSummary {
            applied: 1,
            discarded: 0
        }
    );
    assert_eq!(channel.count(), 0);
}

/// WHAT: An unrecognized command is discarded silently
/// WHY: Unknown input is ignored, never reported
#[test]
fn given_unrecognized_command_when_draining_then_no_render_and_state_unchanged() {
    // Given: "not-a-color" pending
    let channel = CommandChannel::new();
    let renderer = RecordingRenderer::default();
    let mut dispatcher = dispatcher_with(&channel, renderer.clone());
    channel.enqueue("not-a-color".to_string());

    // When: Draining
    let summary = dispatcher.drain();

    // Then: Nothing rendered, initial state kept, queue emptied
    assert!(renderer.names().is_empty());
    assert_eq!(dispatcher.current().name(), "blue");
    assert_eq!(summary.discarded, 1);
    assert_eq!(channel.count(), 0);
}

/// WHAT: Matching is exact and case-sensitive
/// WHY: "Green" and " green" are different commands from "green"
#[test]
fn given_near_miss_commands_when_draining_then_all_discarded() {
    // Given: Variants of a recognized name plus an empty command
    let channel = CommandChannel::new();
    let renderer = RecordingRenderer::default();
    let mut dispatcher = dispatcher_with(&channel, renderer.clone());
    for command in ["Green", " green", "green\n", ""] {
        channel.enqueue(command.to_string());
    }

    // When: Draining
    let summary = dispatcher.drain();

    // Then: None of them render
    assert!(renderer.names().is_empty());
    assert_eq!(summary.discarded, 4);
}

/// WHAT: A burst ends on the last recognized command
/// WHY: Last writer wins after an ordered drain
#[test]
fn given_red_then_green_burst_when_draining_then_final_state_green() {
    // Given: "red" then "green" back to back
    let channel = CommandChannel::new();
    let renderer = RecordingRenderer::default();
    let mut dispatcher = dispatcher_with(&channel, renderer.clone());
    channel.enqueue("red".to_string());
    channel.enqueue("green".to_string());

    // When: Draining once
    dispatcher.drain();

    // Then: Rendered in order, green is current
    assert_eq!(renderer.names(), vec!["red", "green"]);
    assert_eq!(dispatcher.current().name(), "green");
}

/// WHAT: A failed render leaves the current state untouched
/// WHY: The current state must match what is actually shown
#[test]
fn given_failing_renderer_when_draining_then_state_unchanged() {
    // Given: A renderer that cannot show "red"
    let channel = CommandChannel::new();
    let mut dispatcher = dispatcher_with(&channel, RecordingRenderer::failing_on("red"));
    channel.enqueue("red".to_string());

    // When: Draining
    let summary = dispatcher.drain();

    // Then: State stays blue and the command counts as discarded
    assert_eq!(dispatcher.current().name(), "blue");
    assert_eq!(summary.discarded, 1);
}

/// WHAT: A custom recognized set replaces the defaults
/// WHY: The state vocabulary is configuration, not code
#[test]
fn given_custom_states_when_draining_then_only_custom_names_render() {
    // Given: A dispatcher recognizing only "busy" and "idle"
    let channel = CommandChannel::new();
    let renderer = RecordingRenderer::default();
    let mut dispatcher = CommandDispatcher::new(
        channel.clone(),
        RecognizedStates::new(["busy", "idle"]),
        renderer.clone(),
        IndicatorState::new("idle"),
    );
    channel.enqueue("green".to_string());
    channel.enqueue("busy".to_string());

    // When: Draining
    dispatcher.drain();

    // Then: Only "busy" renders
    assert_eq!(renderer.names(), vec!["busy"]);
}

/// WHAT: An enqueue after a drain saw an empty queue is picked up by the next wake
/// WHY: No command may stay stuck in the queue
#[test]
#[allow(clippy::unwrap_used)]
fn given_enqueue_after_empty_drain_when_notified_then_next_drain_applies_it() {
    // Given: A dispatcher thread woken by enqueue notifications
    let channel = CommandChannel::new();
    let renderer = RecordingRenderer::default();
    let mut dispatcher = dispatcher_with(&channel, renderer.clone());

    let (wake_tx, wake_rx) = mpsc::channel();
    channel.subscribe(move |event| {
        if event == ChannelEvent::Enqueued {
            let _ = wake_tx.send(());
        }
    });

    let worker = thread::spawn(move || {
        while wake_rx.recv_timeout(WAIT_TIMEOUT).is_ok() {
            dispatcher.drain();
            if dispatcher.current().name() == "green" {
                break;
            }
        }
        dispatcher.current().clone()
    });

    // When: "red" is drained, the queue is observed empty, then "green" arrives 1ms later
    channel.enqueue("red".to_string());
    let deadline = Instant::now() + WAIT_TIMEOUT;
    while renderer.names().is_empty() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(channel.count(), 0);

    thread::sleep(Duration::from_millis(1));
    channel.enqueue("green".to_string());

    // Then: The follow-up drain applied it
    let final_state = worker.join().unwrap();
    assert_eq!(final_state.name(), "green");
    assert_eq!(renderer.names(), vec!["red", "green"]);
    assert_eq!(channel.count(), 0);
}
