// Expose the modules
pub mod domain;
pub mod api;
pub mod config;
pub mod telemetry;

// Re-export key types for easier usage
pub use api::{Api, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use domain::models::types::{Event, Product};
pub use domain::services::product_service::{
    ProductService, ServiceError, ServiceResult, ValidationError,
};
pub use domain::services::queue::{
    EventQueue, EventReceiver, InMemoryQueue, QueueError, QueueResult,
};
pub use domain::services::store::{InMemoryStore, ProductStore, StoreError, StoreResult};
pub use domain::services::worker_pool::{PoolError, PoolResult, PoolState, WorkerPool};
