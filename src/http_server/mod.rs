//! # HTTP Server Module
//!
//! Axum surface for the dispatch API.
//!
//! # Endpoints
//!
//! - `GET /health` - configuration probe
//! - `POST /bfhl` - the single operation endpoint
//! - anything else - 404 failure envelope
//!
//! Every inbound request passes the fixed-window rate limiter before it
//! reaches a handler.

pub mod config;
pub mod routes;
pub mod server;

pub use config::{HttpServerConfig, ServiceConfig};
pub use routes::AppState;
pub use server::{run, HttpServer};
