mod common;

use common::*;
use marketbrief::application::summarize::{SummarizeUseCase, MISSING_KEY_PLACEHOLDER};
use marketbrief::domain::error::GenerationError;
use marketbrief::domain::values::prompt::PromptTemplate;
use marketbrief::domain::values::stage::StageOutcome;
use marketbrief::infrastructure::llm::openai::OpenAiChat;
use std::sync::Arc;

#[tokio::test]
async fn test_summary_is_trimmed_completion() {
    let generator = Arc::new(FakeGenerator::replying("  日経平均は続伸。\n"));
    let use_case = SummarizeUseCase::new(generator.clone());

    let staged = use_case
        .execute("日経平均: 38000.00", &PromptTemplate::digest())
        .await;

    assert_eq!(staged.value.as_str(), "日経平均は続伸。");
    assert_eq!(staged.outcome, StageOutcome::Ok);
    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("日経平均: 38000.00"));
    assert!(!prompts[0].contains("{data}"));
}

#[tokio::test]
async fn test_empty_document_still_summarized() {
    let generator = Arc::new(FakeGenerator::replying("特記事項なし"));
    let use_case = SummarizeUseCase::new(generator.clone());

    let staged = use_case.execute("", &PromptTemplate::digest()).await;

    assert_eq!(staged.value.as_str(), "特記事項なし");
    assert_eq!(generator.prompts().len(), 1);
}

#[tokio::test]
async fn test_missing_key_gives_placeholder_without_network() {
    let chat = OpenAiChat::new(None, None, None, reqwest::Client::new());
    let use_case = SummarizeUseCase::new(Arc::new(chat));

    let staged = use_case.execute("data", &PromptTemplate::digest()).await;

    assert_eq!(staged.value.as_str(), MISSING_KEY_PLACEHOLDER);
    assert!(staged.is_degraded());
}

#[tokio::test]
async fn test_api_error_becomes_placeholder() {
    let use_case = SummarizeUseCase::new(Arc::new(FakeGenerator::failing(GenerationError::Api {
        status: 429,
        body: "rate limited".into(),
    })));

    let staged = use_case.execute("data", &PromptTemplate::article()).await;

    assert!(staged.value.as_str().starts_with("AI要約生成エラー: "));
    assert!(staged.value.as_str().contains("429"));
    match staged.outcome {
        StageOutcome::Degraded { reason } => assert!(reason.contains("rate limited")),
        StageOutcome::Ok => panic!("expected degraded outcome"),
    }
}

#[tokio::test]
async fn test_blank_completion_is_malformed() {
    let use_case = SummarizeUseCase::new(Arc::new(FakeGenerator::replying("   ")));

    let staged = use_case.execute("data", &PromptTemplate::digest()).await;

    assert!(!staged.value.as_str().trim().is_empty());
    assert!(staged.value.as_str().contains("malformed response"));
    assert!(staged.is_degraded());
}
