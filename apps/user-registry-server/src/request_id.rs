use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{field::Empty, Span};

pub use user_registry::api::rest::REQUEST_ID_HEADER;

#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Root span of one HTTP exchange; `status` and `latency_ms` are filled in on response.
pub fn make_span(req: &Request<Body>) -> Span {
    let rid = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("n/a");
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri().path(),
        version = ?req.version(),
        request_id = %rid,
        status = Empty,
        latency_ms = Empty
    )
}

pub fn record_response(resp: &Response, latency: Duration, span: &Span) {
    span.record("status", resp.status().as_u16());
    span.record("latency_ms", latency.as_millis() as u64);
    tracing::debug!(parent: span, "response sent");
}
