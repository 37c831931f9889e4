//! RFC 9457 problem details shared by the HTTP surface of the registry.
//!
//! `Problem` is the wire body, `ProblemResponse` renders it through axum and
//! `ErrDef` is a static catalog entry that stamps out problems of one kind.

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{FieldErrors, Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};
