//! Extractors that decode a request part and run its validator, rejecting
//! with a 400 validation problem before the handler is entered.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use problem_details::{FieldErrors, ProblemResponse};

use crate::api::rest::trace_id;
use crate::errors::validation_problem;
use crate::validation::Validate;

pub const NULL_BODY: &str = "Request body cannot be null.";

/// JSON body that passed [`Validate`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Query string that passed [`Validate`].
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

/// Path parameters that passed [`Validate`].
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

struct Origin {
    instance: String,
    trace_id: Option<String>,
}

impl Origin {
    fn of(parts: &Parts) -> Self {
        Self {
            instance: parts.uri.path().to_owned(),
            trace_id: trace_id(&parts.headers),
        }
    }

    fn reject(self, errors: FieldErrors) -> ProblemResponse {
        debug!(instance = %self.instance, fields = ?errors.keys().collect::<Vec<_>>(), "Request rejected by validation");
        let mut problem = validation_problem(errors, &self.instance);
        if let Some(id) = self.trace_id {
            problem = problem.with_trace_id(id);
        }
        ProblemResponse(problem)
    }

    fn reject_one(self, field: &str, message: impl Into<String>) -> ProblemResponse {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_owned(), vec![message.into()]);
        self.reject(errors)
    }
}

fn is_null_body(bytes: &[u8]) -> bool {
    let trimmed = bytes.trim_ascii();
    trimmed.is_empty() || trimmed == b"null"
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let origin = Origin::of(&parts);

        let bytes = match Bytes::from_request(Request::from_parts(parts, body), state).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(origin.reject_one("body", e.body_text())),
        };
        if is_null_body(&bytes) {
            return Err(origin.reject_one("body", NULL_BODY));
        }

        let Json(value) = match Json::<T>::from_bytes(&bytes) {
            Ok(json) => json,
            Err(e) => return Err(origin.reject_one("body", e.body_text())),
        };
        match value.validate() {
            Ok(()) => Ok(Self(value)),
            Err(errors) => Err(origin.reject(errors)),
        }
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let origin = Origin::of(parts);
        let Query(value) = match Query::<T>::try_from_uri(&parts.uri) {
            Ok(query) => query,
            Err(e) => return Err(origin.reject_one("query", e.body_text())),
        };
        match value.validate() {
            Ok(()) => Ok(Self(value)),
            Err(errors) => Err(origin.reject(errors)),
        }
    }
}

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let origin = Origin::of(parts);
        let Path(value) = match Path::<T>::from_request_parts(parts, state).await {
            Ok(path) => path,
            Err(e) => return Err(origin.reject_one("path", e.body_text())),
        };
        match value.validate() {
            Ok(()) => Ok(Self(value)),
            Err(errors) => Err(origin.reject(errors)),
        }
    }
}
