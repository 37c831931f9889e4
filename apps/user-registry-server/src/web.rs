use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use runtime::ServerConfig;
use user_registry::api::rest::{openapi::openapi_json, routes::register_routes};
use user_registry::domain::service::Service;

use crate::error_layer::problem_mapping_middleware;
use crate::request_id::{self, MakeReqId, REQUEST_ID_HEADER};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Full application router: registry routes, health, docs and the middleware stack.
pub fn build_router(server: &ServerConfig, service: Arc<Service>) -> Router {
    let mut router = register_routes(Router::new(), service).route("/health", get(health_check));

    if server.enable_docs {
        let doc = Arc::new(openapi_json());
        router = router.route(
            "/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json((*doc).clone()) }
            }),
        );
    }

    // Request path, outermost first:
    // ProblemMapping -> BodyLimit -> CORS -> SetRequestId -> PropagateRequestId -> Trace -> Timeout -> handler
    router = router.layer(TimeoutLayer::new(Duration::from_secs(server.timeout_sec)));
    router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(request_id::make_span)
            .on_response(request_id::record_response),
    );
    router = router.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER));
    router = router.layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeReqId));
    if server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn(problem_mapping_middleware))
}
