//! Request ID middleware

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Span;
use uuid::Uuid;

use crate::request_context::RequestContext;

/// Creates the root span for each HTTP request, assigns a request id, and
/// echoes it in the `x-request-id` response header.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %req.uri().path(),
        http.response.status_code = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let current_span = Span::current();
    let start = Instant::now();

    let request_id = Uuid::new_v4().to_string();
    current_span.record("request_id", request_id.as_str());

    let mut req = req;
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });

    let mut response = next.run(req).await;

    current_span.record(
        "http.response.status_code",
        response.status().as_u16() as i64,
    );
    tracing::debug!(
        latency_ms = start.elapsed().as_millis() as u64,
        status = %response.status(),
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}
