/// Narrative text generation abstraction
///
/// The summarizer and the chat assistant only see the [`TextGenerator`] trait, so the
/// hosted model can be swapped (or mocked in tests) without touching either.
use crate::error::AppResult;

pub mod openai;

pub use openai::OpenAiGenerator;

/// Single-shot text generation from a prompt
///
/// One best-effort call per prompt: no streaming and no retries. Callers decide what a
/// failure means for their request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for `prompt`
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
