//! API layer
//!
//! Validation and dispatch for the single operation endpoint.
//!
//! # Flow
//!
//! - `request` rejects anything but exactly one recognized, well-typed key
//! - `handler` routes the validated operation to the kernel or AI delegate
//! - `response` wraps every outcome in the one envelope shape
//! - `errors` maps every failure to a status code
//!
//! Validation failures short-circuit before any computation or provider
//! call; no operation has side effects.

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiResult};
pub use handler::ApiHandler;
pub use request::{Operation, MAX_FIBONACCI_TERMS};
pub use response::Envelope;
