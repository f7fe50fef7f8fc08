/// Notification raised by a [`CommandChannel`](crate::CommandChannel) after it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    /// An item was appended and is visible to readers.
    Enqueued,
    /// The head item was removed.
    Dequeued,
}
