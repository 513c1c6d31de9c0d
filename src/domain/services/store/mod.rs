use thiserror::Error;

use crate::domain::models::types::Product;

pub mod memory;

pub use memory::InMemoryStore;

/// Errors that can occur within a product store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// No product is stored under the requested id
    #[error("Product {0} not found")]
    NotFound(String),

    /// The backing storage could not complete the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Capability set of a product store.
///
/// The pool only ever talks to this trait, so a durable variant can replace the
/// in-memory map without touching the workers. Implementations must be safe for
/// any number of concurrent callers.
pub trait ProductStore: Send + Sync {
    /// Upserts a product by id. The most recent write for an id wins.
    fn save(&self, product: Product) -> StoreResult<()>;

    /// Returns a copy of the stored product.
    ///
    /// # Returns
    /// * `Ok(Product)` - An owned copy; mutating it never affects the store
    /// * `Err(StoreError::NotFound)` - If nothing is stored under `product_id`
    fn get(&self, product_id: &str) -> StoreResult<Product>;

    /// Removes a product. Deleting an absent id is not an error.
    fn delete(&self, product_id: &str) -> StoreResult<()>;

    /// Number of distinct products currently stored.
    fn count(&self) -> usize;

    /// Releases any resources held by the store.
    fn close(&self) -> StoreResult<()>;
}

#[cfg(test)]
use mockall::*;

#[cfg(test)]
mock! {
    pub ProductStore {}

    impl ProductStore for ProductStore {
        fn save(&self, product: Product) -> StoreResult<()>;

        fn get(&self, product_id: &str) -> StoreResult<Product>;

        fn delete(&self, product_id: &str) -> StoreResult<()>;

        fn count(&self) -> usize;

        fn close(&self) -> StoreResult<()>;
    }
}
