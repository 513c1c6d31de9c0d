//--------------------------------------------------------------------------------------------------
// TEST MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module contains integration tests for the API.
// It drives the router directly and verifies status codes and response bodies.
//--------------------------------------------------------------------------------------------------

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use hyper::Response;
use serde_json::{json, Value, from_slice};
use tokio::time::{sleep, timeout};
use tower::ServiceExt;

use product_updates::{
    Api, EventQueue, InMemoryQueue, InMemoryStore, Product, ProductService, ProductStore,
    WorkerPool,
};

/// Sets up a test router over a fresh store and connected queue.
fn setup_test_router() -> (Router, Arc<InMemoryStore>, Arc<InMemoryQueue>) {
    let store = Arc::new(InMemoryStore::new());
    let queue = Arc::new(InMemoryQueue::new(10));
    queue.connect().unwrap();

    let service = ProductService::new(store.clone(), queue.clone());
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let app = Api::new(addr, service).routes();

    (app, store, queue)
}

/// Helper to parse JSON responses
async fn parse_json_response(response: Response<Body>) -> Value {
    let body_bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();

    from_slice(&body_bytes).unwrap()
}

fn post_event(body: String) -> Request<Body> {
    Request::post("/events")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = setup_test_router();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_json_response(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_submit_event_accepted() {
    let (app, store, queue) = setup_test_router();

    let json_body = json!({
        "product_id": "test123",
        "price": 49.99,
        "stock": 100
    });
    let response = app.oneshot(post_event(json_body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = parse_json_response(response).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["product_id"], "test123");

    // Queued, not yet applied
    assert_eq!(store.count(), 0);
    let event = queue.dequeue().await.unwrap();
    assert_eq!(event.product_id, "test123");
    assert_eq!(event.price, 49.99);
    assert_eq!(event.stock, 100);
}

#[tokio::test]
async fn test_submit_event_invalid_json() {
    let (app, _, queue) = setup_test_router();

    let response = app.oneshot(post_event("invalid json".to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_json_response(response).await;
    assert_eq!(body["error"]["message"], "Invalid request body");
    assert_eq!(body["error"]["code"], 400);
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_submit_event_missing_product_id() {
    let (app, _, queue) = setup_test_router();

    let json_body = json!({ "price": 49.99, "stock": 100 });
    let response = app.oneshot(post_event(json_body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_json_response(response).await;
    assert_eq!(body["error"]["message"], "product_id is required");
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_submit_event_negative_price() {
    let (app, _, _) = setup_test_router();

    let json_body = json!({ "product_id": "test123", "price": -10.0, "stock": 100 });
    let response = app.oneshot(post_event(json_body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_json_response(response).await;
    assert_eq!(body["error"]["message"], "price must be non-negative");
}

#[tokio::test]
async fn test_submit_event_negative_stock() {
    let (app, _, _) = setup_test_router();

    let json_body = json!({ "product_id": "test123", "price": 10.0, "stock": -1 });
    let response = app.oneshot(post_event(json_body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_json_response(response).await;
    assert_eq!(body["error"]["message"], "stock must be non-negative");
}

#[tokio::test]
async fn test_submit_event_after_queue_closed() {
    let (app, _, queue) = setup_test_router();
    queue.close().unwrap();

    let json_body = json!({ "product_id": "test123", "price": 1.0, "stock": 1 });
    let response = app.oneshot(post_event(json_body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_json_response(response).await;
    assert_eq!(body["error"]["message"], "Failed to enqueue event");
}

#[tokio::test]
async fn test_get_product_success() {
    let (app, store, _) = setup_test_router();
    store.save(Product::new("test123", 49.99, 100)).unwrap();

    let response = app
        .oneshot(Request::get("/products/test123").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_json_response(response).await;
    assert_eq!(body["product_id"], "test123");
    assert_eq!(body["price"], 49.99);
    assert_eq!(body["stock"], 100);
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn test_get_product_not_found() {
    let (app, _, _) = setup_test_router();

    let response = app
        .oneshot(Request::get("/products/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_json_response(response).await;
    assert_eq!(body["error"]["message"], "Product not found");
}

#[tokio::test]
async fn test_submitted_event_becomes_readable() {
    let (app, store, queue) = setup_test_router();
    let pool = WorkerPool::new(2, queue.clone(), store.clone());
    pool.start().unwrap();

    let json_body = json!({ "product_id": "sku-9", "price": 12.5, "stock": 3 });
    let response = app
        .clone()
        .oneshot(post_event(json_body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    timeout(Duration::from_secs(5), async {
        while store.count() == 0 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
    pool.stop().await.unwrap();

    let response = app
        .oneshot(Request::get("/products/sku-9").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_json_response(response).await;
    assert_eq!(body["price"], 12.5);
    assert_eq!(body["stock"], 3);
}
