//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// In-memory implementation of the bounded event queue on top of a multi-producer,
// multi-consumer async channel.
//
// | Component        | Description                                                   |
// |------------------|---------------------------------------------------------------|
// | InMemoryQueue    | Fixed capacity FIFO with connect/close lifecycle              |
// | QueueState       | Lifecycle of the queue                                        |
//
// Closing the channel wakes producers blocked on a full queue with an error, while
// receivers keep draining what is already buffered before they observe the end.
//--------------------------------------------------------------------------------------------------

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::domain::models::types::Event;

use super::{EventQueue, EventReceiver, QueueError, QueueResult};

enum QueueState {
    Disconnected,
    Connected {
        sender: Sender<Event>,
        receiver: Receiver<Event>,
    },
}

/// Bounded in-memory event queue.
pub struct InMemoryQueue {
    capacity: usize,
    state: Mutex<QueueState>,
}

impl InMemoryQueue {
    /// Creates a queue holding at most `capacity` events.
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");
        Self {
            capacity,
            state: Mutex::new(QueueState::Disconnected),
        }
    }

    /// Maximum number of buffered events.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events currently buffered, including those still waiting to be
    /// drained after `close`.
    pub fn len(&self) -> usize {
        match &*self.state.lock() {
            QueueState::Connected { receiver, .. } => receiver.len(),
            QueueState::Disconnected => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        match &*self.state.lock() {
            QueueState::Connected { sender, .. } => sender.is_closed(),
            QueueState::Disconnected => false,
        }
    }

    fn sender(&self) -> QueueResult<Sender<Event>> {
        match &*self.state.lock() {
            QueueState::Connected { sender, .. } if sender.is_closed() => Err(QueueError::Closed),
            QueueState::Connected { sender, .. } => Ok(sender.clone()),
            QueueState::Disconnected => Err(QueueError::NotConnected),
        }
    }
}

#[async_trait]
impl EventQueue for InMemoryQueue {
    fn connect(&self) -> QueueResult<()> {
        let mut state = self.state.lock();
        match &*state {
            QueueState::Disconnected => {
                let (sender, receiver) = async_channel::bounded(self.capacity);
                *state = QueueState::Connected { sender, receiver };
                info!(capacity = self.capacity, "InMemoryQueue connected");
                Ok(())
            }
            QueueState::Connected { sender, .. } if sender.is_closed() => Err(QueueError::Closed),
            QueueState::Connected { .. } => {
                warn!("InMemoryQueue already connected");
                Ok(())
            }
        }
    }

    async fn enqueue(&self, event: Event) -> QueueResult<()> {
        let sender = self.sender().map_err(|err| {
            if err == QueueError::Closed {
                warn!(product_id = %event.product_id, "Enqueue attempted on closed queue");
            }
            err
        })?;

        sender.send(event).await.map_err(|_| QueueError::Closed)
    }

    async fn dequeue(&self) -> Option<Event> {
        let receiver = self.receiver().ok()?;
        receiver.recv().await
    }

    fn close(&self) -> QueueResult<()> {
        match &*self.state.lock() {
            QueueState::Connected { sender, .. } => {
                if !sender.close() {
                    return Err(QueueError::AlreadyClosed);
                }
                info!("InMemoryQueue closed");
                Ok(())
            }
            QueueState::Disconnected => Err(QueueError::NotConnected),
        }
    }

    fn receiver(&self) -> QueueResult<EventReceiver> {
        match &*self.state.lock() {
            QueueState::Connected { receiver, .. } => Ok(EventReceiver::new(receiver.clone())),
            QueueState::Disconnected => Err(QueueError::NotConnected),
        }
    }
}
