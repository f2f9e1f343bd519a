use crate::{ApplicationError, OrderSyncError};
use serde_json::Value;

pub const ORDER_CREATED_SCOPE: &str = "store/order/created";

/// The parts of an order webhook delivery the pipeline acts on. The platform
/// sends `{ scope, store_id, data: { type, id }, hash, created_at, producer }`;
/// only `data.id` is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEvent {
    pub order_id: u64,
    pub scope: Option<String>,
    pub producer: Option<String>,
}

impl OrderEvent {
    pub fn from_slice(body: &[u8]) -> Result<Self, OrderSyncError> {
        let payload = serde_json::from_slice::<Value>(body).map_err(|e| {
            tracing::warn!("Failed to deserialize webhook payload: {e}");
            ApplicationError::bad_request("Invalid JSON payload", None)
        })?;

        Self::from_value(&payload)
    }

    pub fn from_value(payload: &Value) -> Result<Self, OrderSyncError> {
        let order_id = payload
            .pointer("/data/id")
            .and_then(Value::as_u64)
            .filter(|id| *id > 0)
            .ok_or_else(|| ApplicationError::bad_request("Missing order ID", None))?;

        Ok(Self {
            order_id,
            scope: payload
                .get("scope")
                .and_then(Value::as_str)
                .map(str::to_owned),
            producer: payload
                .get("producer")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }

    pub fn is_order_created(&self) -> bool {
        self.scope.as_deref().map_or(true, |s| s == ORDER_CREATED_SCOPE)
    }
}
