//! Response envelope
//!
//! One fixed shape for every endpoint and every error path: the success
//! flag and identity are always present (identity is null until the
//! service is configured), `data` appears only on success, `error` only
//! on failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ApiError;

/// The uniform response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub is_success: bool,
    pub identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Success envelope carrying an operation result
    pub fn success(identity: impl Into<String>, data: Value) -> Self {
        Self {
            is_success: true,
            identity: Some(identity.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Success envelope with no result payload (health probe)
    pub fn ok(identity: impl Into<String>) -> Self {
        Self {
            is_success: true,
            identity: Some(identity.into()),
            data: None,
            error: None,
        }
    }

    /// Failure envelope for an API error
    pub fn failure(identity: Option<&str>, err: &ApiError) -> Self {
        Self {
            is_success: false,
            identity: identity.map(str::to_string),
            data: None,
            error: Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let envelope = Envelope::success("john_doe_17091999", json!([0, 1, 1, 2, 3]));
        let rendered = serde_json::to_string(&envelope).unwrap();
        assert!(rendered.contains("\"is_success\":true"));
        assert!(rendered.contains("\"data\":[0,1,1,2,3]"));
        assert!(!rendered.contains("error"));
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let err = ApiError::invalid_request("bad payload");
        let envelope = Envelope::failure(Some("john_doe_17091999"), &err);
        let rendered = serde_json::to_string(&envelope).unwrap();
        assert!(rendered.contains("\"is_success\":false"));
        assert!(rendered.contains("bad payload"));
        assert!(!rendered.contains("data"));
    }

    #[test]
    fn test_failure_envelope_null_identity() {
        let err = ApiError::config("identity missing");
        let rendered = serde_json::to_string(&Envelope::failure(None, &err)).unwrap();
        assert!(rendered.contains("\"identity\":null"));
    }
}
