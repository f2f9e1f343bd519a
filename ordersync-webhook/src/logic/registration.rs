use crate::{domain::response::ApiResponse, server::AppState};
use axum::{extract::State, Json};
use http::Method;
use ordersync_domain::{
    Api, ApplicationError, InternalError, OrderSyncError, ORDER_CREATED_SCOPE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Body of `POST /stores/{hash}/v3/hooks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRegistration {
    pub scope: String,
    pub destination: String,
    pub is_active: bool,
    pub events_history_enabled: bool,
}

impl HookRegistration {
    pub fn order_created(public_domain: &str) -> Self {
        let domain = public_domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        Self {
            scope: ORDER_CREATED_SCOPE.to_string(),
            destination: format!("https://{domain}/api/webhook"),
            is_active: true,
            events_history_enabled: true,
        }
    }
}

/// Subscribes this service to order creation events on the configured store.
#[tracing::instrument(skip(state))]
pub async fn register(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Value>>, OrderSyncError> {
    let Some(public_domain) = state
        .config
        .public_domain
        .as_deref()
        .filter(|domain| !domain.trim().is_empty())
    else {
        tracing::error!("PUBLIC_DOMAIN is not set, cannot register the webhook");
        return Err(ApplicationError::internal_server_error(
            "Missing env variables",
            Some("public_domain"),
        ));
    };

    let registration = HookRegistration::order_created(public_domain);
    let body = serde_json::to_vec(&registration).map_err(|e| {
        InternalError::serialize_error(
            &format!("Failed to serialize hook registration: {e}"),
            Some("hook_registration"),
        )
    })?;

    let response = state
        .client
        .request(Method::POST, &state.endpoints.hooks(), Api::Commerce)
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Failed to reach the hooks endpoint: {e}");
            failed_registration()
        })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
        tracing::error!("Failed to read the hooks response: {e}");
        failed_registration()
    })?;

    if !status.is_success() {
        tracing::error!(%status, body = %text, "Webhook registration was rejected");
        return Err(failed_registration());
    }

    let data = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text))
    };

    tracing::info!(
        destination = %registration.destination,
        "Registered order created webhook"
    );

    Ok(Json(ApiResponse::success(data)))
}

fn failed_registration() -> OrderSyncError {
    ApplicationError::internal_server_error("Failed to register webhook", Some("registration"))
}
