use crate::{ChannelEvent, CommandChannel, CoreError};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    thread,
};

const WRITER_THREADS: usize = 4;
const ITEMS_PER_WRITER: usize = 250;

/// WHAT: Items leave in the order they entered
/// WHY: Commands must be applied in arrival order
#[test]
#[allow(clippy::unwrap_used)]
fn given_enqueued_sequence_when_draining_then_same_order() {
    // Given: Three commands enqueued with no interleaved dequeues
    let channel = CommandChannel::new();
    for command in ["red", "green", "blue"] {
        channel.enqueue(command.to_string());
    }

    // When: Draining the whole queue
    let mut drained = Vec::new();
    while channel.count() > 0 {
        drained.push(channel.dequeue().unwrap());
    }

    // Then: Order is preserved
    assert_eq!(drained, vec!["red", "green", "blue"]);
}

/// WHAT: Count returns to its previous value after enqueue then dequeue
/// WHY: The drain loop relies on count as its continuation check
#[test]
#[allow(clippy::unwrap_used)]
fn given_enqueue_then_dequeue_when_counting_then_count_restored() {
    // Given: A channel with one pending item
    let channel = CommandChannel::new();
    channel.enqueue("white".to_string());
    let before = channel.count();

    // When: Enqueuing and immediately dequeuing
    channel.enqueue("black".to_string());
    assert_eq!(channel.count(), before + 1);
    let _ = channel.dequeue().unwrap();

    // Then: Count is back to where it was
    assert_eq!(channel.count(), before);
}

/// WHAT: Dequeue on an empty channel returns EmptyChannel
/// WHY: Empty dequeue must be an explicit error, never undefined behavior
#[test]
fn given_empty_channel_when_dequeuing_then_empty_channel_error() {
    // Given: A fresh channel
    let channel: CommandChannel<String> = CommandChannel::new();

    // When: Dequeuing
    let result = channel.dequeue();

    // Then: EmptyChannel error and count stays zero
    assert!(matches!(result, Err(CoreError::EmptyChannel { .. })));
    assert_eq!(channel.count(), 0);
    assert!(channel.is_empty());
}

/// WHAT: Every mutation notifies subscribers exactly once
/// WHY: The dispatcher is woken by these notifications
#[test]
#[allow(clippy::unwrap_used)]
fn given_subscriber_when_mutating_then_one_event_per_operation() {
    // Given: A channel with a recording subscriber
    let channel = CommandChannel::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    channel.subscribe(move |event| sink.lock().unwrap().push(event));

    // When: Two enqueues, one dequeue and one failed dequeue
    channel.enqueue("red".to_string());
    channel.enqueue("green".to_string());
    let _ = channel.dequeue().unwrap();
    let _ = channel.dequeue().unwrap();
    let _ = channel.dequeue();

    // Then: Four events, none for the failed dequeue
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            ChannelEvent::Enqueued,
            ChannelEvent::Enqueued,
            ChannelEvent::Dequeued,
            ChannelEvent::Dequeued,
        ]
    );
}

/// WHAT: The enqueue notification sees the new item
/// WHY: A drain started from the notification must find the item
#[test]
#[allow(clippy::unwrap_used)]
fn given_enqueue_notification_when_counting_inside_callback_then_item_visible() {
    // Given: A subscriber that records the count it observes
    let channel = CommandChannel::new();
    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    let handle = channel.clone();
    channel.subscribe(move |event| {
        if event == ChannelEvent::Enqueued {
            sink.lock().unwrap().push(handle.count());
        }
    });

    // When: Enqueuing twice
    channel.enqueue("cyan".to_string());
    channel.enqueue("purple".to_string());

    // Then: The callback ran without deadlock and saw each item
    assert_eq!(*observed.lock().unwrap(), vec![1, 2]);
}

/// WHAT: Concurrent writers never lose or duplicate items
/// WHY: The receive task and tests enqueue from different threads
#[test]
#[allow(clippy::unwrap_used)]
fn given_concurrent_writers_when_draining_then_all_items_once_in_per_writer_order() {
    // Given: Several threads enqueuing distinct items
    let channel = CommandChannel::new();
    let handles: Vec<_> = (0..WRITER_THREADS)
        .map(|writer| {
            let channel = channel.clone();
            thread::spawn(move || {
                for seq in 0..ITEMS_PER_WRITER {
                    channel.enqueue((writer, seq));
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    // When: Draining everything
    let mut drained = Vec::new();
    while channel.count() > 0 {
        drained.push(channel.dequeue().unwrap());
    }

    // Then: Every item exactly once, each writer's items in order
    assert_eq!(drained.len(), WRITER_THREADS * ITEMS_PER_WRITER);

    let mut per_writer: HashMap<usize, Vec<usize>> = HashMap::new();
    for (writer, seq) in drained {
        per_writer.entry(writer).or_default().push(seq);
    }

    for writer in 0..WRITER_THREADS {
        let expected: Vec<usize> = (0..ITEMS_PER_WRITER).collect();
        assert_eq!(per_writer.get(&writer), Some(&expected));
    }
}
