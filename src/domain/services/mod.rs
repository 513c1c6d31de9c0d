//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Services that make up the update pipeline, leaf-first.
//
// | Component          | Description                                                  |
// |--------------------|--------------------------------------------------------------|
// | store              | Concurrency-safe product map                                 |
// | queue              | Bounded FIFO of pending events                               |
// | worker_pool        | Fixed set of workers draining the queue into the store       |
// | product_service    | Producer side: validation, enqueue and the read path         |
//--------------------------------------------------------------------------------------------------

pub mod store;
pub mod queue;
pub mod worker_pool;
pub mod product_service;
