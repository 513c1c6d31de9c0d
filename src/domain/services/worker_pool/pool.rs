//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the worker pool that applies queued events to the product store.
// A fixed number of tokio tasks race on the queue's consumption handle; each one converts
// the event it received into a product snapshot and saves it.
//
// | Component           | Description                                                 |
// |---------------------|-------------------------------------------------------------|
// | WorkerPool          | Owns the workers and their start/stop protocol              |
// | Worker              | Single dequeue → convert → save loop                        |
//
// With more than one worker, two events for the same product may be applied in either
// order. The store keeps whichever save lands last.
//
// Stopping does not discard work: a cancelled worker empties whatever is still buffered
// with non-blocking receives before it exits.
//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name               | Description                                       | Key Methods         |
// |--------------------|---------------------------------------------------|---------------------|
// | WorkerPool         | Fixed set of concurrent consumers                 | start, stop, state  |
// | Worker             | One consumer task                                 | run, process_event  |
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use parking_lot::Mutex;
use tokio::select;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::domain::models::types::Event;
use crate::domain::services::queue::{EventQueue, EventReceiver};
use crate::domain::services::store::ProductStore;

use super::{PoolError, PoolResult, PoolState};

#[derive(Debug, Default)]
struct PoolStats {
    processed: AtomicU64,
    failed: AtomicU64,
}

/// Fixed-size pool of workers draining an event queue into a product store.
///
/// `start` may be called once. `stop` cancels every worker and returns only after
/// all of them have exited. Events buffered in the queue at that point are applied
/// before the workers return.
pub struct WorkerPool {
    worker_count: usize,
    queue: Arc<dyn EventQueue>,
    store: Arc<dyn ProductStore>,
    cancel: CancellationToken,
    state: Mutex<PoolState>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    stats: Arc<PoolStats>,
}

impl WorkerPool {
    /// Creates a pool that will run `worker_count` workers once started.
    ///
    /// # Panics
    /// If `worker_count` is zero.
    pub fn new(
        worker_count: usize,
        queue: Arc<dyn EventQueue>,
        store: Arc<dyn ProductStore>,
    ) -> Self {
        assert!(worker_count > 0, "worker pool needs at least one worker");
        Self {
            worker_count,
            queue,
            store,
            cancel: CancellationToken::new(),
            state: Mutex::new(PoolState::Created),
            handles: Mutex::new(Vec::with_capacity(worker_count)),
            stats: Arc::new(PoolStats::default()),
        }
    }

    /// Spawns the workers onto the current tokio runtime.
    pub fn start(&self) -> PoolResult<()> {
        let mut state = self.state.lock();
        if *state != PoolState::Created {
            return Err(PoolError::AlreadyStarted(*state));
        }

        let receiver = self.queue.receiver()?;
        info!(worker_count = self.worker_count, "Starting worker pool");

        let mut handles = self.handles.lock();
        for id in 1..=self.worker_count {
            let worker = Worker {
                id,
                receiver: receiver.clone(),
                store: Arc::clone(&self.store),
                cancel: self.cancel.child_token(),
                stats: Arc::clone(&self.stats),
            };
            handles.push(tokio::spawn(worker.run()));
        }

        *state = PoolState::Running;
        Ok(())
    }

    /// Signals every worker to stop and waits for all of them to exit.
    ///
    /// There is no deadline here; callers that need one should wrap this call in
    /// `tokio::time::timeout` and treat expiry as a failed shutdown.
    pub async fn stop(&self) -> PoolResult<()> {
        {
            let mut state = self.state.lock();
            if *state != PoolState::Running {
                return Err(PoolError::NotRunning(*state));
            }
            *state = PoolState::Draining;
        }

        info!("Stopping worker pool");
        self.cancel.cancel();

        let handles = std::mem::take(&mut *self.handles.lock());
        let panicked = join_all(handles)
            .await
            .into_iter()
            .filter(|result| result.is_err())
            .count();

        *self.state.lock() = PoolState::Stopped;
        info!(
            processed = self.processed(),
            failed = self.failed(),
            "Worker pool stopped"
        );

        if panicked > 0 {
            error!(panicked, "Workers exited abnormally");
            return Err(PoolError::WorkerPanicked(panicked));
        }
        Ok(())
    }

    pub fn state(&self) -> PoolState {
        *self.state.lock()
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Number of events successfully saved so far.
    pub fn processed(&self) -> u64 {
        self.stats.processed.load(Ordering::Relaxed)
    }

    /// Number of events dropped because the store rejected them.
    pub fn failed(&self) -> u64 {
        self.stats.failed.load(Ordering::Relaxed)
    }
}

/// A single consumer task.
struct Worker {
    id: usize,
    receiver: EventReceiver,
    store: Arc<dyn ProductStore>,
    cancel: CancellationToken,
    stats: Arc<PoolStats>,
}

impl Worker {
    async fn run(self) {
        info!(worker_id = self.id, "Worker started");

        loop {
            select! {
                biased;

                _ = self.cancel.cancelled() => {
                    let drained = self.drain();
                    info!(worker_id = self.id, drained, "Worker stopping");
                    return;
                }
                event = self.receiver.recv() => {
                    match event {
                        Some(event) => self.process_event(event),
                        None => {
                            info!(worker_id = self.id, "Queue closed");
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Applies every event still buffered without waiting for new ones.
    fn drain(&self) -> usize {
        let mut drained = 0;
        while let Some(event) = self.receiver.try_recv() {
            self.process_event(event);
            drained += 1;
        }
        drained
    }

    /// Applies one event to the store. A failed save is logged and dropped.
    fn process_event(&self, event: Event) {
        debug!(worker_id = self.id, product_id = %event.product_id, "Processing event");

        let product = event.to_product();
        match self.store.save(product) {
            Ok(()) => {
                self.stats.processed.fetch_add(1, Ordering::Relaxed);
                debug!(
                    worker_id = self.id,
                    product_id = %event.product_id,
                    price = event.price,
                    stock = event.stock,
                    "Product updated"
                );
            }
            Err(err) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                error!(
                    worker_id = self.id,
                    product_id = %event.product_id,
                    error = %err,
                    "Failed to save product"
                );
            }
        }
    }
}
