//! Operation dispatcher
//!
//! Routes a validated operation to the number theory kernel or the AI
//! delegate and shapes the success payload. Kernel arms run under a
//! panic guard so a per-request failure degrades to a client error
//! instead of taking down the worker.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde_json::{json, Value};

use crate::ai::AiDelegate;
use crate::numtheory;

use super::errors::{ApiError, ApiResult};
use super::request::Operation;

/// Dispatches validated operations
pub struct ApiHandler {
    ai: AiDelegate,
}

impl ApiHandler {
    pub fn new(ai: AiDelegate) -> Self {
        Self { ai }
    }

    /// Execute one operation and return its result payload.
    ///
    /// The only suspending arm is the AI call; everything else is pure
    /// computation.
    pub async fn dispatch(&self, operation: Operation) -> ApiResult<Value> {
        match operation {
            Operation::Fibonacci(n) => Self::compute(move || json!(numtheory::fibonacci(n))),
            Operation::Prime(values) => Self::compute(move || {
                let primes: Vec<i64> = values
                    .into_iter()
                    .filter(|&v| numtheory::is_prime(v))
                    .collect();
                json!(primes)
            }),
            Operation::Hcf(values) => Self::compute(move || json!(numtheory::gcd_all(&values))),
            Operation::Lcm(values) => Self::compute(move || json!(numtheory::lcm_all(&values))),
            Operation::Ai(question) => {
                let answer = self.ai.ask(&question).await?;
                Ok(json!(answer))
            }
        }
    }

    /// Run a kernel computation behind a panic boundary.
    fn compute(f: impl FnOnce() -> Value) -> ApiResult<Value> {
        catch_unwind(AssertUnwindSafe(f))
            .map_err(|_| ApiError::invalid_request("computation failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handler() -> ApiHandler {
        ApiHandler::new(AiDelegate::disabled())
    }

    #[tokio::test]
    async fn test_dispatch_fibonacci() {
        let data = handler()
            .dispatch(Operation::Fibonacci(5))
            .await
            .unwrap();
        assert_eq!(data, json!([0, 1, 1, 2, 3]));
    }

    #[tokio::test]
    async fn test_dispatch_prime_filter() {
        let data = handler()
            .dispatch(Operation::Prime(vec![2, 3, 4, 5, 9, 11]))
            .await
            .unwrap();
        assert_eq!(data, json!([2, 3, 5, 11]));
    }

    #[tokio::test]
    async fn test_dispatch_hcf_and_lcm() {
        let h = handler();
        assert_eq!(
            h.dispatch(Operation::Hcf(vec![12, 18, 24])).await.unwrap(),
            json!(6)
        );
        assert_eq!(
            h.dispatch(Operation::Lcm(vec![4, 6])).await.unwrap(),
            json!(12)
        );
    }

    #[tokio::test]
    async fn test_dispatch_ai_unconfigured() {
        let err = handler()
            .dispatch(Operation::Ai("capital of France?".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AiUnavailable));
    }

    #[test]
    fn test_compute_catches_panic() {
        let result = ApiHandler::compute(|| panic!("kernel bug"));
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
