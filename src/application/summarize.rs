use crate::domain::entities::summary::Summary;
use crate::domain::error::GenerationError;
use crate::domain::ports::text_generator::TextGenerator;
use crate::domain::values::prompt::PromptTemplate;
use crate::domain::values::stage::Staged;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MISSING_KEY_PLACEHOLDER: &str = "エラー: OpenAI API Keyが設定されていません。";

/// Turns a document into a summary. Total: any failure becomes a
/// placeholder summary and a degraded outcome.
pub struct SummarizeUseCase {
    generator: Arc<dyn TextGenerator>,
}

impl SummarizeUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self, document: &str, template: &PromptTemplate) -> Staged<Summary> {
        let prompt = template.render(document);
        debug!(generator = self.generator.name(), prompt_chars = prompt.chars().count(), "requesting summary");

        let result = match self.generator.complete(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                Err(GenerationError::Malformed("empty completion".to_string()))
            }
            other => other,
        };

        match result {
            Ok(text) => {
                info!(chars = text.chars().count(), "summary generated");
                Staged::ok(Summary::new(text.trim()))
            }
            Err(e) => {
                warn!(error = %e, "summary generation failed, publishing placeholder");
                Staged::degraded(Summary::new(placeholder_for(&e)), e.to_string())
            }
        }
    }
}

pub fn placeholder_for(error: &GenerationError) -> String {
    match error {
        GenerationError::MissingCredential(_) => MISSING_KEY_PLACEHOLDER.to_string(),
        other => format!("AI要約生成エラー: {other}"),
    }
}
