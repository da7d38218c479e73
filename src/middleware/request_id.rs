use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

/// Wrap each request in a tracing span carrying a request id (incoming
/// `x-request-id` when present and sane, otherwise a fresh uuid), log the
/// outcome, and echo the id back on the response.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| is_valid_request_id(s))
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = tracing::info_span!("request", request_id = %request_id);

    let method = req.method().clone();
    let uri = req.uri().clone();

    let start = std::time::Instant::now();
    let mut response = next.run(req).instrument(span).await;
    let latency_ms = start.elapsed().as_millis();

    tracing::info!(
        method = %method,
        path = %uri.path(),
        status = %response.status().as_u16(),
        latency_ms = %latency_ms,
        "request completed"
    );

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

fn is_valid_request_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.len() <= 64
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
