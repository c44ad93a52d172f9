//! Logging middleware

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

/// Log one line per request with its outcome and latency
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if response.status().is_server_error() {
        error!(%method, %path, status, %duration_ms, "Request failed");
    } else if response.status().is_client_error() {
        warn!(%method, %path, status, %duration_ms, "Request rejected");
    } else {
        info!(%method, %path, status, %duration_ms, "Request completed");
    }

    response
}
