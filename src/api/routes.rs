//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name                  | Description                            | Return Type         |
// |-----------------------|----------------------------------------|---------------------|
// | health                | Health check endpoint                  | Response            |
// | submit_event          | Validate and enqueue a product update  | ApiResult<Response> |
// | get_product           | Get the current state of a product     | ApiResult<Response> |
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;
use axum::{
    extract::{Path, Extension, rejection::JsonRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{
    AppState,
    ApiResult,
    SubmitEventRequest,
    SubmitEventResponse,
    ProductResponse,
};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy"
    }))
}

/// Validate a product update and place it on the queue.
///
/// 202 means the update was queued; it may not be visible to reads yet.
pub async fn submit_event(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<SubmitEventRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = payload?;

    let event = state
        .service
        .submit_event(&req.product_id, req.price, req.stock)
        .await?;
    info!(product_id = %event.product_id, "Event accepted");

    let response = SubmitEventResponse::from(event);
    Ok((StatusCode::ACCEPTED, Json(response)).into_response())
}

/// Get the current state of a product
pub async fn get_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> ApiResult<Response> {
    let product = state.service.fetch_product(&product_id)?;

    let response = ProductResponse::from(product);
    Ok((StatusCode::OK, Json(response)).into_response())
}
