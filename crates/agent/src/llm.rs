use anyhow::Result;
use async_trait::async_trait;

/// Minimal completion seam over the LLM service.
///
/// `parts` are sent as one request in order (e.g. a system instruction
/// followed by the user payload); the reply is the model's raw text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, parts: &[&str]) -> Result<String>;
}
