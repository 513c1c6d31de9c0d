//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the REST boundary of the product update service using Axum.
// It validates inbound updates, hands them to the queue, and serves product reads.
//
// | Component      | Description                                                |
// |----------------|-----------------------------------------------------------|
// | API            | Main API structure coordinating routes and middleware      |
// | Routes         | Handler functions for API endpoints                        |
// | States         | Shared application state                                   |
// | DTOs           | Data transfer objects for API requests/responses           |
//
//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name           | Description                                       | Key Methods       |
// |----------------|---------------------------------------------------|------------------|
// | AppState       | Shared application state                         | new               |
// | Api            | Main API structure                               | routes, serve     |
//--------------------------------------------------------------------------------------------------

mod routes;
mod dto;
mod error;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    Extension,
    routing::{get, post},
    http::{Method, header},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::domain::services::product_service::ProductService;

pub use error::{ApiError, ApiResult};
pub use dto::*;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared application state accessible by all handlers
pub struct AppState {
    pub service: ProductService,
}

impl AppState {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

/// Main API structure
pub struct Api {
    /// API address
    addr: SocketAddr,
    /// Shared application state
    state: Arc<AppState>,
    /// Upper bound on the time spent serving one request
    request_timeout: Duration,
}

impl Api {
    /// Creates a new API instance
    pub fn new(addr: SocketAddr, service: ProductService) -> Self {
        Self {
            addr,
            state: Arc::new(AppState::new(service)),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Creates all routes for the API
    pub fn routes(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/health", get(routes::health))
            .route("/events", post(routes::submit_event))
            .route("/products/:id", get(routes::get_product))
            .layer(Extension(self.state.clone()))
            .layer(TimeoutLayer::new(self.request_timeout))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Starts the API server and runs until `shutdown` completes
    pub async fn serve<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.routes();

        let listener = TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "API listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
