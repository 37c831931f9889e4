//! Turns bare error responses from the framework and middleware (unknown
//! route, wrong method, timeout, oversized body) into problem+json.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use problem_details::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};

use crate::request_id::REQUEST_ID_HEADER;

pub async fn problem_mapping_middleware(request: Request, next: Next) -> Response {
    let instance = request.uri().path().to_owned();
    let client_request_id = request_id(request.headers());

    let response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_problem_response(&response) {
        return response;
    }

    let mut problem = Problem::new(status, status.canonical_reason().unwrap_or("Error"), "")
        .with_instance(instance);
    if let Some(id) = request_id(response.headers()).or(client_request_id) {
        problem = problem.with_trace_id(id);
    }
    debug!(status = status.as_u16(), instance = %problem.instance, "Mapped bare error response to problem");

    let (parts, _) = response.into_parts();
    let mut mapped = ProblemResponse(problem).into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            mapped.headers_mut().append(name.clone(), value.clone());
        }
    }
    mapped
}

fn is_problem_response(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(APPLICATION_PROBLEM_JSON))
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
