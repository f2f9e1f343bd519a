use super::registration;
use crate::{domain::response::ApiResponse, server::AppState};
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use ordersync_domain::{AggregatedResult, OrderEvent, OrderSyncError};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/webhook", post(receive_order_event))
        .route("/webhook/register", get(registration::register))
}

/// Takes the raw body so that malformed JSON and a missing order id both
/// surface as our own 400 envelope instead of axum's extractor rejection.
#[tracing::instrument(skip(state, body))]
pub async fn receive_order_event(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<AggregatedResult>>, OrderSyncError> {
    let event = OrderEvent::from_slice(&body)?;

    if !event.is_order_created() {
        tracing::warn!(
            scope = event.scope.as_deref(),
            "Received a delivery that is not an order creation, aggregating anyway"
        );
    }

    tracing::info!(
        order_id = event.order_id,
        producer = event.producer.as_deref(),
        "Received order webhook"
    );

    let result = state.aggregator.aggregate(event.order_id).await?;

    Ok(Json(ApiResponse::success(result)))
}
