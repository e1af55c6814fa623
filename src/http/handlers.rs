//! Request dispatch and per-endpoint handlers.
//!
//! # Responsibilities
//! - Resolve the request against the route table
//! - Read and validate bodies for create/replace/update
//! - Apply the operation to the store and shape the response
//!
//! # Design Decisions
//! - Replace/update/delete check the id before reading the body,
//!   so an unknown id is a 404 even when the body is malformed
//! - Handlers return `Result<Response, ApiError>`; errors render themselves
//! - The request deadline covers body read and handling, so a stalled
//!   upload ends in a JSON 408 like every other error

use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::catalog::payload::{self, ProductPatch};
use crate::catalog::ProductStore;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{Endpoint, RouteMatch};

/// Catch-all handler: route lookup, then the endpoint's handler.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = crate::http::request::request_id(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (label, result) = match state.routes.resolve(&method, &path) {
        Some(route) => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                endpoint = %route.endpoint,
                "Dispatching request"
            );
            let label = route.endpoint.name();
            let handled = handle(&state, route, request.into_body());
            let result = match tokio::time::timeout(state.request_timeout, handled).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(request_id = %request_id, endpoint = label, "Request timed out");
                    Err(ApiError::RequestTimeout)
                }
            };
            (label, result)
        }
        None => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
            ("none", Err(ApiError::EndpointNotFound))
        }
    };

    let response = result.unwrap_or_else(IntoResponse::into_response);
    let status = response.status();
    if status.is_client_error() {
        tracing::debug!(request_id = %request_id, status = %status, "Request rejected");
    }
    metrics::record_request(method.as_str(), label, status.as_u16(), start);
    response
}

async fn handle(state: &AppState, route: RouteMatch, body: Body) -> Result<Response, ApiError> {
    let store = state.store.as_ref();
    let id = route.params.get("id").unwrap_or_default();

    match route.endpoint {
        Endpoint::ListProducts => list_products(store).await,
        Endpoint::GetProduct => get_product(store, id).await,
        Endpoint::CreateProduct => {
            let body = read_body(body, state.max_body_bytes).await?;
            create_product(store, &body).await
        }
        Endpoint::ReplaceProduct => {
            ensure_exists(store, id).await?;
            let body = read_body(body, state.max_body_bytes).await?;
            replace_product(store, id, &body).await
        }
        Endpoint::UpdateProduct => {
            ensure_exists(store, id).await?;
            let body = read_body(body, state.max_body_bytes).await?;
            update_product(store, id, &body).await
        }
        Endpoint::DeleteProduct => delete_product(store, id).await,
    }
}

async fn ensure_exists(store: &ProductStore, id: &str) -> Result<(), ApiError> {
    if store.contains(id).await {
        Ok(())
    } else {
        Err(ApiError::ProductNotFound)
    }
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, ApiError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        tracing::debug!(error = %e, limit, "Failed to read request body");
        ApiError::BodyTooLarge
    })
}

/// `GET /products`
pub async fn list_products(store: &ProductStore) -> Result<Response, ApiError> {
    Ok((StatusCode::OK, Json(store.list().await)).into_response())
}

/// `GET /products/{id}`
pub async fn get_product(store: &ProductStore, id: &str) -> Result<Response, ApiError> {
    let record = store.get(id).await.ok_or(ApiError::ProductNotFound)?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

/// `POST /products`
pub async fn create_product(store: &ProductStore, body: &[u8]) -> Result<Response, ApiError> {
    let record = payload::parse_record(body)?;
    let product = store.create(record).await?;
    tracing::info!(id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// `PUT /products/{id}`
pub async fn replace_product(
    store: &ProductStore,
    id: &str,
    body: &[u8],
) -> Result<Response, ApiError> {
    let record = payload::parse_record(body)?;
    let product = store.replace(id, record).await?;
    tracing::info!(id = %product.id, "Product replaced");
    Ok((StatusCode::OK, Json(product)).into_response())
}

/// `PATCH /products/{id}`
pub async fn update_product(
    store: &ProductStore,
    id: &str,
    body: &[u8],
) -> Result<Response, ApiError> {
    let patch = ProductPatch::parse(body)?;
    let product = store.patch(id, patch).await?;
    tracing::info!(id = %product.id, "Product updated");
    Ok((StatusCode::OK, Json(product)).into_response())
}

/// `DELETE /products/{id}`
pub async fn delete_product(store: &ProductStore, id: &str) -> Result<Response, ApiError> {
    let product = store.delete(id).await?;
    tracing::info!(id = %product.id, "Product deleted");
    Ok((StatusCode::OK, Json(product)).into_response())
}
