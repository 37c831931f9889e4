use utoipa::OpenApi;

use crate::api::rest::dto::{CreateUserReq, CreatedUserDto, UpdateUserReq, UserDto};
use crate::api::rest::handlers;
use crate::contract::model::SearchType;

/// OpenAPI document for the registry endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "User Registry API", description = "Create, look up, update and delete user profiles"),
    paths(
        handlers::create_user,
        handlers::get_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(
        CreateUserReq,
        UpdateUserReq,
        CreatedUserDto,
        UserDto,
        SearchType,
        problem_details::Problem,
    )),
    tags((name = "users", description = "User profile management"))
)]
pub struct ApiDoc;

/// Rendered document as served at `/openapi.json`.
pub fn openapi_json() -> serde_json::Value {
    serde_json::to_value(ApiDoc::openapi()).unwrap_or_default()
}
