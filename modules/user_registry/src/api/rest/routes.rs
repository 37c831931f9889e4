use std::sync::Arc;

use axum::{
    routing::{get, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const USERS_PATH: &str = "/users";
pub const USER_PATH: &str = "/users/{userId}";

/// Mount the registry endpoints on `router` and attach the service.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    // POST /users, GET /users?searchType=..&value=..
    let router = router.route(
        USERS_PATH,
        get(handlers::get_user).post(handlers::create_user),
    );

    // PUT /users/{userId}, DELETE /users/{userId}
    let router = router.route(
        USER_PATH,
        put(handlers::update_user).delete(handlers::delete_user),
    );

    router.layer(Extension(service))
}
