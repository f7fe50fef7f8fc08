use crate::{CoreError, CoreResult, channel::ChannelEvent};

use std::{
    collections::VecDeque,
    fmt,
    panic::Location,
    sync::{Arc, Mutex, MutexGuard},
};

use error_location::ErrorLocation;
use tracing::{error, trace};

type Subscriber = Arc<dyn Fn(ChannelEvent) + Send + Sync>;

struct Shared<T> {
    queue: Mutex<VecDeque<T>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// Ordered, thread-safe hand-off queue between the network receive task and
/// the dispatcher.
///
/// Cloning yields another handle to the same queue. Every successful
/// `enqueue` and `dequeue` notifies all subscribers exactly once, after the
/// queue lock has been released, on the thread that made the change.
pub struct CommandChannel<T> {
    shared: Arc<Shared<T>>,
}

impl<T> CommandChannel<T> {
    /// Create an empty channel with no subscribers.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(VecDeque::new()),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a callback invoked after every enqueue and dequeue.
    ///
    /// Callbacks run on whichever thread mutated the queue and must not
    /// block. They may call back into the channel.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(ChannelEvent) + Send + Sync + 'static,
    {
        lock_recovering(&self.shared.subscribers, "subscriber list").push(Arc::new(callback));
    }

    /// Append `item` to the tail of the queue.
    pub fn enqueue(&self, item: T) {
        let pending = {
            let mut queue = self.lock_queue();
            queue.push_back(item);
            queue.len()
        };

        trace!(pending, "Command enqueued");
        self.notify(ChannelEvent::Enqueued);
    }

    /// Remove and return the head of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyChannel`] when nothing is pending.
    #[track_caller]
    pub fn dequeue(&self) -> CoreResult<T> {
        let item = self
            .lock_queue()
            .pop_front()
            .ok_or_else(|| CoreError::EmptyChannel {
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.notify(ChannelEvent::Dequeued);

        Ok(item)
    }

    /// Number of pending items at the moment of the call.
    ///
    /// Another thread may change the queue right after this returns, so the
    /// value is only a hint for drain loops.
    pub fn count(&self) -> usize {
        self.lock_queue().len()
    }

    /// Whether nothing is pending at the moment of the call.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<T>> {
        lock_recovering(&self.shared.queue, "command queue")
    }

    fn notify(&self, event: ChannelEvent) {
        // Snapshot so callbacks run without the subscriber lock held.
        let subscribers: Vec<Subscriber> =
            lock_recovering(&self.shared.subscribers, "subscriber list").clone();

        for subscriber in subscribers {
            subscriber(event);
        }
    }
}

// A poisoned lock only means a holder panicked; the queue itself is intact.
fn lock_recovering<'a, V>(mutex: &'a Mutex<V>, what: &'static str) -> MutexGuard<'a, V> {
    mutex.lock().unwrap_or_else(|e| {
        error!(lock = what, "Lock poisoned, recovering: {}", e);
        e.into_inner()
    })
}

impl<T> Clone for CommandChannel<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for CommandChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CommandChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandChannel")
            .field("pending", &self.count())
            .finish()
    }
}
