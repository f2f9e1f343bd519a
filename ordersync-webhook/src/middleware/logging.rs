use axum::{body::Body, middleware::Next, response::Response};
use http::Request;
use std::time::Instant;

/// One log line per request, at a level that follows the response status.
pub async fn log_request_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, path = %path, status, latency_ms, "Request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, path = %path, status, latency_ms, "Request rejected");
    } else {
        tracing::info!(%method, path = %path, status, latency_ms, "Request handled");
    }

    response
}
