use thiserror::Error;

use super::queue::QueueError;

pub mod pool;

pub use pool::WorkerPool;

/// Lifecycle of a worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Constructed, no workers spawned yet
    Created,
    /// Workers are draining the queue
    Running,
    /// Stop was requested; waiting for workers to exit
    Draining,
    /// Every worker has exited
    Stopped,
}

/// Errors that can occur while starting or stopping a worker pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// `start` was called on a pool that has already been started
    #[error("Worker pool already started (state: {0:?})")]
    AlreadyStarted(PoolState),

    /// `stop` was called on a pool that is not running
    #[error("Worker pool is not running (state: {0:?})")]
    NotRunning(PoolState),

    /// The queue could not hand out a consumption handle
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// One or more workers panicked instead of exiting cleanly
    #[error("{0} worker(s) panicked")]
    WorkerPanicked(usize),
}

/// Type alias for Result with PoolError
pub type PoolResult<T> = Result<T, PoolError>;
