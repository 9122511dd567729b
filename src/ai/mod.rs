//! AI delegate
//!
//! Forwards a validated natural-language question to an external
//! text-generation provider and reduces the reply to a single
//! punctuation-free word. The provider sits behind the [`TextGenerator`]
//! trait; which implementation is wired in (and whether one is wired in
//! at all) is decided by configuration. Calls are synchronous with
//! respect to the request: no retry, no caching.

mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiGenerator};

/// Instruction framing every question sent to the provider
const ONE_WORD_INSTRUCTION: &str =
    "Answer the question with exactly one word. Do not use punctuation. \
     Do not add any explanation.";

/// Punctuation stripped from the answer token. Fixed ASCII set; non-ASCII
/// punctuation passes through untouched, matching the original behavior.
const STRIPPED_PUNCTUATION: &[char] = &['"', '\'', '.', ',', '?', '!', ':', ';', '-'];

/// AI delegate failure conditions
#[derive(Debug, Error)]
pub enum AiError {
    /// No provider credential configured; the call is never attempted
    #[error("no AI provider is configured")]
    Unavailable,

    /// The provider responded without any generated text
    #[error("provider returned no answer")]
    NoAnswer,

    /// Transport, auth, or provider-side failure. The detail never
    /// contains the credential.
    #[error("{0}")]
    Provider(String),
}

/// An external text-generation capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` under `system` framing.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AiError>;
}

/// Question-answering delegate over an optional provider
pub struct AiDelegate {
    provider: Option<Arc<dyn TextGenerator>>,
}

impl AiDelegate {
    pub fn new(provider: Arc<dyn TextGenerator>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Delegate with no provider: every ask fails with `Unavailable`.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// Build the delegate from the optional provider credential.
    pub fn configured(api_key: Option<&str>, model: &str) -> Self {
        let Some(key) = api_key else {
            return Self::disabled();
        };
        match GeminiGenerator::new(GeminiConfig::new(key, model)) {
            Ok(generator) => Self::new(Arc::new(generator)),
            Err(err) => {
                tracing::warn!(error = %err, "AI provider construction failed, disabling AI operation");
                Self::disabled()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Ask the provider and normalize its reply to one word.
    pub async fn ask(&self, question: &str) -> Result<String, AiError> {
        let provider = self.provider.as_ref().ok_or(AiError::Unavailable)?;
        let raw = provider.generate(ONE_WORD_INSTRUCTION, question).await?;
        if raw.trim().is_empty() {
            return Err(AiError::NoAnswer);
        }
        Ok(normalize_answer(&raw))
    }
}

/// Keep the first whitespace-separated token and drop the fixed
/// punctuation set from it.
fn normalize_answer(raw: &str) -> String {
    raw.split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}
