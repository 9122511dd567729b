//! bfhl-api - a single-endpoint dispatch service
//!
//! One operation endpoint, five mutually-exclusive request keys: three
//! number-theory computations, a primality filter, and a one-word AI
//! answer. Stateless per request; the only process-wide state is the
//! rate limiter table.

pub mod ai;
pub mod api;
pub mod http_server;
pub mod numtheory;
pub mod ratelimit;
