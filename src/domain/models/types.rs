//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the two values that flow through the update pipeline: the inbound
// `Event` produced at the HTTP boundary and the `Product` state materialized in the store.
//
// | Section            | Description                                                      |
// |--------------------|------------------------------------------------------------------|
// | STRUCTS            | Event and Product.                                               |
// | TESTS              | Conversion tests.                                                |
//--------------------------------------------------------------------------------------------------

//--------------------------------------------------------------------------------------------------
//  STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                       | Key Methods       |
// |---------------|---------------------------------------------------|-------------------|
// | Event         | Request to change a product's price and stock     | new, to_product   |
// | Product       | Current state of one product in the store         | new               |
//--------------------------------------------------------------------------------------------------
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inbound update for a single product.
///
/// Events are immutable once created. They move by value from the producer into a
/// queue slot and from there onto a worker's stack, so nothing ever shares one mutably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Identifier of the product to update. Non-empty by producer contract.
    pub product_id: String,
    /// New unit price. Non-negative by producer contract.
    pub price: f64,
    /// New stock level. Non-negative by producer contract.
    pub stock: i64,
    /// When the producer created this event.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event stamped with the current time.
    pub fn new(product_id: impl Into<String>, price: f64, stock: i64) -> Self {
        Self::with_timestamp(product_id, price, stock, Utc::now())
    }

    /// Creates a new event with an explicit creation time.
    pub fn with_timestamp(
        product_id: impl Into<String>,
        price: f64,
        stock: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            price,
            stock,
            created_at,
        }
    }

    /// Builds the product snapshot this event describes.
    ///
    /// The mapping is field-for-field, with `updated_at` taken from the event's
    /// creation time rather than the time the event happens to be applied.
    pub fn to_product(&self) -> Product {
        Product {
            product_id: self.product_id.clone(),
            price: self.price,
            stock: self.stock,
            updated_at: self.created_at,
        }
    }
}

impl From<Event> for Product {
    fn from(event: Event) -> Self {
        Product {
            product_id: event.product_id,
            price: event.price,
            stock: event.stock,
            updated_at: event.created_at,
        }
    }
}

/// Materialized state of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub price: f64,
    pub stock: i64,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product stamped with the current time.
    pub fn new(product_id: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            product_id: product_id.into(),
            price,
            stock,
            updated_at: Utc::now(),
        }
    }
}
