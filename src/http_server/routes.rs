//! HTTP routes
//!
//! The two endpoints plus the 404 fallback, and the rate-limit
//! middleware that wraps every inbound request. Handlers translate every
//! outcome into the uniform envelope; nothing escapes as a bare
//! framework error.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::ai::AiDelegate;
use crate::api::{ApiError, ApiHandler, Envelope, Operation};
use crate::ratelimit::{Decision, FixedWindowLimiter};

use super::config::ServiceConfig;

/// Shared state for all handlers
pub struct AppState {
    pub config: ServiceConfig,
    pub limiter: FixedWindowLimiter,
    pub handler: ApiHandler,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let limiter = FixedWindowLimiter::new(config.rate_limit, config.rate_window);
        let ai = AiDelegate::configured(config.gemini_api_key.as_deref(), &config.gemini_model);
        Self {
            config,
            limiter,
            handler: ApiHandler::new(ai),
        }
    }
}

/// Create the API routes with the rate limiter wrapped around them
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/bfhl", post(bfhl_handler))
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .with_state(state)
}

/// Health probe: reports the configuration state, independent of the AI
/// credential.
async fn health_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Envelope>) {
    match &state.config.identity {
        Some(identity) => (StatusCode::OK, Json(Envelope::ok(identity.as_str()))),
        None => failure(None, &ApiError::config("BFHL_IDENTITY is not set")),
    }
}

/// The operation endpoint
async fn bfhl_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Envelope>) {
    let Some(identity) = state.config.identity.clone() else {
        return failure(None, &ApiError::config("BFHL_IDENTITY is not set"));
    };

    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            let err = ApiError::invalid_request(format!("invalid JSON body: {rejection}"));
            return failure(Some(&identity), &err);
        }
    };

    let operation = match Operation::parse(&body) {
        Ok(operation) => operation,
        Err(err) => return failure(Some(&identity), &err),
    };

    match state.handler.dispatch(operation).await {
        Ok(data) => (StatusCode::OK, Json(Envelope::success(identity.as_str(), data))),
        Err(err) => {
            if matches!(err, ApiError::AiProvider(_)) {
                tracing::warn!(error = %err, "AI provider call failed");
            }
            failure(Some(&identity), &err)
        }
    }
}

/// Unmatched routes get the same failure envelope
async fn fallback_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Envelope>) {
    failure(state.config.identity.as_deref(), &ApiError::NotFound)
}

/// Rate-limit middleware wrapping every route
async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_identity(&request);
    if state.limiter.check(&client) == Decision::Denied {
        tracing::debug!(client = %client, "rate limit exceeded");
        let (status, body) = failure(state.config.identity.as_deref(), &ApiError::RateLimited);
        return (status, body).into_response();
    }
    next.run(request).await
}

/// Best-effort client identity: forwarded-for header first, then the
/// peer address, then a shared "unknown" bucket. Never blocks a request.
fn client_identity(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next().map(str::trim) {
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn failure(identity: Option<&str>, err: &ApiError) -> (StatusCode, Json<Envelope>) {
    (err.status(), Json(Envelope::failure(identity, err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    #[test]
    fn test_client_identity_prefers_forwarded_header() {
        let request = http::Request::builder()
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_identity(&request), "203.0.113.9");
    }

    #[test]
    fn test_client_identity_falls_back_to_peer_address() {
        let mut request = http::Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.1:4000".parse().unwrap()));
        assert_eq!(client_identity(&request), "192.0.2.1");
    }

    #[test]
    fn test_client_identity_unknown_bucket() {
        let request = http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_identity(&request), "unknown");
    }

    #[test]
    fn test_client_identity_ignores_blank_forwarded_header() {
        let request = http::Request::builder()
            .header("x-forwarded-for", "  ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_identity(&request), "unknown");
    }
}
