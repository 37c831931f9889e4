use std::fmt;

use thiserror::Error;

use crate::contract::model::UnknownSearchType;

/// Classification of a failed registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    UserNotFound,
    RecordAlreadyExists,
    InvalidInput,
    InvalidSearchType,
    Unauthorized,
    DatabaseError,
    Exception,
    InternalServerError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Domain error: a kind plus a human-readable message, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DomainError {
    pub kind: ErrorKind,
    pub message: String,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserNotFound, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RecordAlreadyExists, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn invalid_search_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSearchType, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DatabaseError, message)
    }

    pub fn exception(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Exception, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<UnknownSearchType> for DomainError {
    fn from(e: UnknownSearchType) -> Self {
        DomainError::invalid_search_type(format!(
            "'{}' is not a valid search type. Must be 'UserId' or 'EmailAddress' or 'PhoneNumber'.",
            e.0
        ))
    }
}
