use crate::domain::error::GenerationError;
use async_trait::async_trait;

/// Remote generative-text model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the first completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}
