use crate::{logic::webhook, middleware::logging::log_request_middleware, server::AppState};
use axum::{middleware::from_fn, response::IntoResponse, routing::get, Json, Router};
use ordersync_domain::{ApplicationError, OrderSyncError};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", webhook::get_router())
        .route("/", get(get_root))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .layer(from_fn(log_request_middleware))
        .layer(TraceLayer::new_for_http())
}

pub async fn get_root() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

pub async fn not_found_handler() -> OrderSyncError {
    ApplicationError::not_found("Not found", None)
}
