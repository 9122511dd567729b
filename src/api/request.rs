//! Request validation
//!
//! The request body is a JSON object carrying exactly one recognized
//! operation key. Key-count and key-name checks run before any value is
//! inspected; payload checks run before any computation.

use serde_json::Value;

use super::errors::{ApiError, ApiResult};

/// Upper bound on the fibonacci term count
pub const MAX_FIBONACCI_TERMS: i64 = 1000;

/// A validated operation, ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Fibonacci(u32),
    Prime(Vec<i64>),
    Hcf(Vec<i64>),
    Lcm(Vec<i64>),
    Ai(String),
}

impl Operation {
    /// Validate a parsed JSON body and extract the single operation.
    pub fn parse(body: &Value) -> ApiResult<Self> {
        let map = body
            .as_object()
            .ok_or_else(|| ApiError::invalid_request("request body must be a JSON object"))?;

        if map.len() != 1 {
            return Err(ApiError::invalid_request(format!(
                "expected exactly one operation key, got {}",
                map.len()
            )));
        }

        let (key, value) = map
            .iter()
            .next()
            .ok_or_else(|| ApiError::invalid_request("expected exactly one operation key"))?;

        match key.as_str() {
            "fibonacci" => {
                let n = value.as_i64().ok_or_else(|| {
                    ApiError::invalid_request("fibonacci requires an integer value")
                })?;
                if n <= 0 || n > MAX_FIBONACCI_TERMS {
                    return Err(ApiError::invalid_request(format!(
                        "fibonacci value must be between 1 and {}",
                        MAX_FIBONACCI_TERMS
                    )));
                }
                Ok(Operation::Fibonacci(n as u32))
            }
            "prime" => Ok(Operation::Prime(parse_int_array("prime", value)?)),
            "hcf" => Ok(Operation::Hcf(parse_int_array("hcf", value)?)),
            "lcm" => Ok(Operation::Lcm(parse_int_array("lcm", value)?)),
            "AI" => {
                let question = value
                    .as_str()
                    .ok_or_else(|| ApiError::invalid_request("AI requires a string value"))?;
                let trimmed = question.trim();
                if trimmed.is_empty() {
                    return Err(ApiError::invalid_request("AI question must not be empty"));
                }
                Ok(Operation::Ai(trimmed.to_string()))
            }
            other => Err(ApiError::invalid_request(format!(
                "unrecognized operation key: {}",
                other
            ))),
        }
    }
}

fn parse_int_array(key: &str, value: &Value) -> ApiResult<Vec<i64>> {
    let array = value
        .as_array()
        .ok_or_else(|| ApiError::invalid_request(format!("{} requires an array of integers", key)))?;
    if array.is_empty() {
        return Err(ApiError::invalid_request(format!(
            "{} array must not be empty",
            key
        )));
    }
    array
        .iter()
        .map(|element| {
            element.as_i64().ok_or_else(|| {
                ApiError::invalid_request(format!("{} array elements must be integers", key))
            })
        })
        .collect()
}
