pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod routes;

use axum::http::{HeaderMap, HeaderName};

/// Header carrying the per-request id assigned by the server.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request id to stamp on problems as `traceId`.
pub(crate) fn trace_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
