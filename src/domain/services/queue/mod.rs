use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::types::Event;

pub mod memory;

pub use memory::InMemoryQueue;

/// Errors that can occur within an event queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The queue was used before `connect`
    #[error("Queue is not connected")]
    NotConnected,

    /// The queue no longer accepts events
    #[error("Queue is closed")]
    Closed,

    /// `close` was called on a queue that is already closed
    #[error("Queue is already closed")]
    AlreadyClosed,
}

/// Type alias for Result with QueueError
pub type QueueResult<T> = Result<T, QueueError>;

/// Capability set of a bounded event queue.
///
/// The worker pool depends only on this trait, leaving room for a durable queue
/// alongside the in-memory one.
#[async_trait]
pub trait EventQueue: Send + Sync {
    /// Prepares the queue for use.
    fn connect(&self) -> QueueResult<()>;

    /// Appends an event at the tail.
    ///
    /// Waits while the queue is full until a slot frees up or the queue is closed.
    /// Callers must not enqueue after `close`; doing so returns `QueueError::Closed`.
    async fn enqueue(&self, event: Event) -> QueueResult<()>;

    /// Takes the head event, waiting while the queue is empty.
    ///
    /// # Returns
    /// * `Some(Event)` - The next event in FIFO order
    /// * `None` - The queue is closed and fully drained
    async fn dequeue(&self) -> Option<Event>;

    /// Stops accepting events. Buffered events are still delivered.
    fn close(&self) -> QueueResult<()>;

    /// Returns a consumption handle that many workers can receive from at once.
    fn receiver(&self) -> QueueResult<EventReceiver>;
}

/// Read-only consumption handle onto a queue.
///
/// Backed by a multi-consumer channel: cloning is cheap and every clone competes
/// for the same events, each event going to exactly one receiver.
#[derive(Debug, Clone)]
pub struct EventReceiver {
    inner: async_channel::Receiver<Event>,
}

impl EventReceiver {
    pub(crate) fn new(receiver: async_channel::Receiver<Event>) -> Self {
        Self { inner: receiver }
    }

    /// Receives the next event, or `None` once the queue is closed and drained.
    ///
    /// Cancel safe: dropping the future before it completes never loses an event.
    pub async fn recv(&self) -> Option<Event> {
        self.inner.recv().await.ok()
    }

    /// Takes the next buffered event without waiting.
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Number of events currently buffered.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
