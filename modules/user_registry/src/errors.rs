//! Error catalog for the registry and the mapping from domain errors to
//! RFC 9457 problems.

use problem_details::{ErrDef, FieldErrors, Problem};

use crate::domain::error::{DomainError, ErrorKind};

pub const VALIDATION_FAILED: ErrDef = ErrDef {
    status: 400,
    title: "One or more validation errors occurred.",
    code: "USER_REGISTRY_VALIDATION",
    type_url: "https://tools.ietf.org/html/rfc7231#section-6.5.1",
};

pub const RECORD_ALREADY_EXISTS: ErrDef = ErrDef {
    status: 409,
    title: "Record already exists.",
    code: "USER_REGISTRY_CONFLICT",
    type_url: "https://tools.ietf.org/html/rfc7231#section-6.5.9",
};

pub const USER_NOT_FOUND: ErrDef = ErrDef {
    status: 422,
    title: "User not found.",
    code: "USER_REGISTRY_NOT_FOUND",
    type_url: "https://tools.ietf.org/html/rfc4918#section-11.2",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal server error.",
    code: "USER_REGISTRY_INTERNAL",
    type_url: "https://tools.ietf.org/html/rfc7231#section-6.6.1",
};

/// Catalog entry for a domain error kind.
pub fn err_def(kind: ErrorKind) -> &'static ErrDef {
    match kind {
        ErrorKind::RecordAlreadyExists => &RECORD_ALREADY_EXISTS,
        ErrorKind::UserNotFound | ErrorKind::NotFound => &USER_NOT_FOUND,
        ErrorKind::InvalidInput
        | ErrorKind::InvalidSearchType
        | ErrorKind::Unauthorized
        | ErrorKind::DatabaseError
        | ErrorKind::Exception
        | ErrorKind::InternalServerError => &INTERNAL,
    }
}

/// Problem for a failed domain operation; `detail` is the error message.
pub fn domain_problem(e: &DomainError, instance: &str) -> Problem {
    if err_def(e.kind).status >= 500 {
        tracing::error!(kind = %e.kind, error = %e.message, "Request failed with internal error");
    }
    err_def(e.kind)
        .to_problem(e.message.clone())
        .with_instance(instance)
}

/// Problem for a request rejected before reaching the service.
pub fn validation_problem(errors: FieldErrors, instance: &str) -> Problem {
    VALIDATION_FAILED
        .to_problem(String::new())
        .with_instance(instance)
        .with_errors(errors)
}
