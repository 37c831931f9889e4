use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::info;

use problem_details::ProblemResponse;

use crate::api::rest::dto::{
    CreateUserReq, CreatedUserDto, GetUserQuery, UpdateUserReq, UserDto, UserIdPath,
};
use crate::api::rest::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::api::rest::trace_id;
use crate::domain::error::DomainError;
use crate::domain::service::Service;
use crate::errors::domain_problem;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    operation_id = "user_registry.create_user",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "User created", body = CreatedUserDto),
        (status = 400, description = "Validation failed", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 409, description = "Email address or phone number already registered", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error", body = problem_details::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<CreateUserReq>,
) -> Result<(StatusCode, Json<CreatedUserDto>), ProblemResponse> {
    info!("Handling user registration");

    match svc.create_user(req.into()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created.into()))),
        Err(e) => Err(map_domain_error(&e, &uri, &headers)),
    }
}

/// Look up a user by id, email address or phone number
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    operation_id = "user_registry.get_user",
    params(GetUserQuery),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Validation failed", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 422, description = "User not found", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error", body = problem_details::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    headers: HeaderMap,
    ValidatedQuery(query): ValidatedQuery<GetUserQuery>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!(search_type = %query.search_type, "Handling user lookup");

    match svc.find_user(&query.value, &query.search_type).await {
        Ok(user) => Ok(Json(user.into())),
        Err(e) => Err(map_domain_error(&e, &uri, &headers)),
    }
}

/// Update some of a user's fields
#[utoipa::path(
    put,
    path = "/users/{userId}",
    tag = "users",
    operation_id = "user_registry.update_user",
    params(UserIdPath),
    request_body = UpdateUserReq,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Validation failed", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 409, description = "Email address or phone number already registered", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 422, description = "User not found", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error", body = problem_details::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    headers: HeaderMap,
    ValidatedPath(path): ValidatedPath<UserIdPath>,
    ValidatedJson(req): ValidatedJson<UpdateUserReq>,
) -> Result<StatusCode, ProblemResponse> {
    info!(user_id = %path.user_id, "Handling user update");

    match svc.update_user(&path.user_id, req.into()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(map_domain_error(&e, &uri, &headers)),
    }
}

/// Delete a user by id
#[utoipa::path(
    delete,
    path = "/users/{userId}",
    tag = "users",
    operation_id = "user_registry.delete_user",
    params(UserIdPath),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Validation failed", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 422, description = "User not found", body = problem_details::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error", body = problem_details::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    headers: HeaderMap,
    ValidatedPath(path): ValidatedPath<UserIdPath>,
) -> Result<StatusCode, ProblemResponse> {
    info!(user_id = %path.user_id, "Handling user deletion");

    match svc.delete_user(&path.user_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(map_domain_error(&e, &uri, &headers)),
    }
}

/// Map domain errors to problem responses
fn map_domain_error(error: &DomainError, uri: &Uri, headers: &HeaderMap) -> ProblemResponse {
    let mut problem = domain_problem(error, uri.path());
    if let Some(id) = trace_id(headers) {
        problem = problem.with_trace_id(id);
    }
    ProblemResponse(problem)
}
