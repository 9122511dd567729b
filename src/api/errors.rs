//! API error taxonomy
//!
//! Every failure path in the service maps to exactly one variant here,
//! and every variant maps to exactly one HTTP status. Nothing propagates
//! past the request boundary.

use axum::http::StatusCode;
use thiserror::Error;

use crate::ai::AiError;

/// Request-level error, rendered as the failure envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad shape, type, range, or key count in the request body
    #[error("{0}")]
    InvalidRequest(String),

    /// Fixed-window threshold exceeded; transient
    #[error("rate limit exceeded, retry after the current window elapses")]
    RateLimited,

    /// AI operation requested but no provider credential is configured
    #[error("AI service is not configured")]
    AiUnavailable,

    /// Transport, auth, or provider-side failure of the AI call
    #[error("AI service error: {0}")]
    AiProvider(String),

    /// Required process configuration is missing; fatal to all endpoints
    #[error("missing required configuration: {0}")]
    Config(String),

    /// No route matched the request
    #[error("route not found")]
    NotFound,
}

impl ApiError {
    /// Create a client validation error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ApiError::InvalidRequest(reason.into())
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        ApiError::Config(reason.into())
    }

    /// The HTTP status this error surfaces as
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::AiUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::AiProvider(_) => StatusCode::BAD_GATEWAY,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Unavailable => ApiError::AiUnavailable,
            AiError::NoAnswer => ApiError::AiProvider("provider returned no answer".to_string()),
            AiError::Provider(detail) => ApiError::AiProvider(detail),
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::invalid_request("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::AiUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::AiProvider("boom".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::config("identity").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_ai_error_conversion() {
        assert!(matches!(
            ApiError::from(AiError::Unavailable),
            ApiError::AiUnavailable
        ));
        assert!(matches!(
            ApiError::from(AiError::NoAnswer),
            ApiError::AiProvider(_)
        ));
    }
}
