//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name            | Description                                       | Key Methods          |
// |-----------------|---------------------------------------------------|----------------------|
// | InMemoryStore   | Reader/writer locked map of product id to state   | save, get, delete    |
// |                 |                                                   | count                |
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::models::types::Product;

use super::{ProductStore, StoreError, StoreResult};

/// In-memory product store guarded by a reader/writer lock.
///
/// Concurrent `get`s share the read lock; `save` and `delete` take the write lock
/// and exclude all other access for their duration. `parking_lot`'s lock is
/// eventually fair, so neither side can starve the other indefinitely.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }
}

impl ProductStore for InMemoryStore {
    fn save(&self, product: Product) -> StoreResult<()> {
        let mut products = self.products.write();
        products.insert(product.product_id.clone(), product);
        Ok(())
    }

    fn get(&self, product_id: &str) -> StoreResult<Product> {
        let products = self.products.read();
        products
            .get(product_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(product_id.to_string()))
    }

    fn delete(&self, product_id: &str) -> StoreResult<()> {
        let mut products = self.products.write();
        if products.remove(product_id).is_none() {
            debug!(product_id, "Delete requested for absent product");
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.products.read().len()
    }

    fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}
