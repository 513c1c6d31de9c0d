use thiserror::Error;

use crate::domain::services::queue::QueueError;
use crate::domain::services::store::StoreError;

pub mod service;

pub use service::ProductService;

/// Reasons an inbound update is rejected before it reaches the queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("product_id is required")]
    MissingProductId,

    #[error("price must be non-negative")]
    NegativePrice,

    #[error("stock must be non-negative")]
    NegativeStock,
}

/// Errors that can occur in the product service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The update was rejected by validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No product is stored under the requested id
    #[error("Product {0} not found")]
    NotFound(String),

    /// The queue refused the event
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// The store failed on the read path
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Type alias for Result with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
