use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Error detail attached to an error response's extensions by
/// [`AppError`](crate::error::AppError) so the request log can report it.
#[derive(Debug, Clone)]
pub struct LoggedError(pub String);

/// Log method, path, status and duration of every request.
///
/// 5xx responses log at ERROR, 4xx at WARN, everything else at INFO.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    let error = response
        .extensions()
        .get::<LoggedError>()
        .map(|e| e.0.as_str());

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, ?elapsed, error, "Request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, status, ?elapsed, error, "Request rejected");
    } else {
        tracing::info!(%method, %path, status, ?elapsed, "Request completed");
    }

    response
}
