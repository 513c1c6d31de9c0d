//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                 | Description                               | Key Methods         |
// |----------------------|-------------------------------------------|---------------------|
// | SubmitEventRequest   | Request to update a product               |                     |
// | SubmitEventResponse  | Acknowledgement that an update was queued | from                |
// | ProductResponse      | Current state of a product                | from                |
//--------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::domain::models::types::{Event, Product};

/// Request to update a product's price and stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEventRequest {
    /// Missing ids deserialize as empty and are rejected by validation
    #[serde(default)]
    pub product_id: String,
    pub price: f64,
    pub stock: i64,
}

/// Acknowledgement returned once an update is queued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEventResponse {
    pub status: String,
    pub product_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for SubmitEventResponse {
    fn from(event: Event) -> Self {
        Self {
            status: "accepted".to_string(),
            product_id: event.product_id,
            created_at: event.created_at,
        }
    }
}

/// Response for a product read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product_id: String,
    pub price: f64,
    pub stock: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            price: product.price,
            stock: product.stock,
            updated_at: product.updated_at,
        }
    }
}
