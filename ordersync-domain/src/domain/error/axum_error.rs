use crate::{ErrorMeta, OrderSyncError};
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;

impl IntoResponse for OrderSyncError {
    fn into_response(self) -> Response {
        (&self).into_response()
    }
}

impl IntoResponse for &OrderSyncError {
    fn into_response(self) -> Response {
        let (code, key) = (self.code(), self.key());

        if self.is_internal() {
            tracing::error!(%code, %key, "Request failed with internal error: {self}");
        } else {
            tracing::warn!(%code, %key, "Request failed: {self}");
        }

        let status: StatusCode = self.into();

        (status, Json(self.as_json())).into_response()
    }
}
