// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::model;

// === ERROR CATALOG ===
pub mod errors;

// === INTERNAL MODULES ===
// Exposed for the server binary and for tests; external consumers should
// stick to `contract` and the REST surface.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
#[doc(hidden)]
pub mod validation;
