//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name               | Description                                       | Key Methods          |
// |--------------------|---------------------------------------------------|----------------------|
// | ProductService     | Validates and enqueues updates, serves reads      | submit_event         |
// |                    |                                                   | fetch_product        |
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;

use tracing::debug;

use crate::domain::models::types::{Event, Product};
use crate::domain::services::queue::EventQueue;
use crate::domain::services::store::ProductStore;

use super::{ServiceResult, ValidationError};

/// Producer side of the pipeline.
///
/// Accepting an update means it was enqueued, not that it has been applied;
/// reads may not see it until a worker gets to it.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    queue: Arc<dyn EventQueue>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, queue: Arc<dyn EventQueue>) -> Self {
        Self { store, queue }
    }

    /// Checks the producer contract for an update.
    pub fn validate(product_id: &str, price: f64, stock: i64) -> Result<(), ValidationError> {
        if product_id.is_empty() {
            return Err(ValidationError::MissingProductId);
        }
        if price.is_nan() || price < 0.0 {
            return Err(ValidationError::NegativePrice);
        }
        if stock < 0 {
            return Err(ValidationError::NegativeStock);
        }
        Ok(())
    }

    /// Validates an update and places it on the queue.
    ///
    /// Waits if the queue is full. Returns the event that was enqueued.
    pub async fn submit_event(
        &self,
        product_id: &str,
        price: f64,
        stock: i64,
    ) -> ServiceResult<Event> {
        Self::validate(product_id, price, stock)?;

        let event = Event::new(product_id, price, stock);
        self.queue.enqueue(event.clone()).await?;
        debug!(product_id, "Event enqueued");
        Ok(event)
    }

    /// Reads the current state of a product.
    pub fn fetch_product(&self, product_id: &str) -> ServiceResult<Product> {
        Ok(self.store.get(product_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::product_service::ServiceError;
    use crate::domain::services::queue::{InMemoryQueue, QueueError};
    use crate::domain::services::store::InMemoryStore;

    fn setup() -> (ProductService, Arc<InMemoryStore>, Arc<InMemoryQueue>) {
        let store = Arc::new(InMemoryStore::new());
        let queue = Arc::new(InMemoryQueue::new(10));
        queue.connect().unwrap();
        let service = ProductService::new(store.clone(), queue.clone());
        (service, store, queue)
    }

    #[test]
    fn test_validate() {
        assert_eq!(ProductService::validate("p1", 0.0, 0), Ok(()));
        assert_eq!(
            ProductService::validate("", 1.0, 1),
            Err(ValidationError::MissingProductId)
        );
        assert_eq!(
            ProductService::validate("p1", -0.01, 1),
            Err(ValidationError::NegativePrice)
        );
        assert_eq!(
            ProductService::validate("p1", f64::NAN, 1),
            Err(ValidationError::NegativePrice)
        );
        assert_eq!(
            ProductService::validate("p1", 1.0, -1),
            Err(ValidationError::NegativeStock)
        );
    }

    #[tokio::test]
    async fn test_submit_event_enqueues() {
        let (service, store, queue) = setup();

        let event = service.submit_event("p1", 49.99, 100).await.unwrap();

        let queued = queue.dequeue().await.unwrap();
        assert_eq!(queued, event);
        // Accepted is not applied
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_event_never_reaches_queue() {
        let (service, _, queue) = setup();

        let result = service.submit_event("p1", -10.0, 1).await;

        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::NegativePrice))
        ));
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_submit_after_close() {
        let (service, _, queue) = setup();
        queue.close().unwrap();

        let result = service.submit_event("p1", 1.0, 1).await;

        assert!(matches!(result, Err(ServiceError::Queue(QueueError::Closed))));
    }

    #[test]
    fn test_fetch_product() {
        let (service, store, _) = setup();
        store.save(Product::new("p1", 3.5, 9)).unwrap();

        assert_eq!(service.fetch_product("p1").unwrap().stock, 9);
        assert!(matches!(
            service.fetch_product("nope"),
            Err(ServiceError::NotFound(id)) if id == "nope"
        ));
    }
}
