pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::pipeline::{NewsReport, Pipeline, PipelineSettings, RunOptions, RunReport};
use crate::config::AppConfig;
use crate::domain::entities::collected_document::CollectedDocument;
use crate::domain::error::DomainError;
use crate::domain::ports::feed_reader::FeedReader;
use crate::domain::ports::publisher::Publisher;
use crate::domain::ports::quote_provider::QuoteProvider;
use crate::domain::ports::text_generator::TextGenerator;
use crate::domain::values::publish_target::TargetKind;
use crate::domain::values::stage::Staged;
use crate::infrastructure::feeds::rss::HttpFeedReader;
use crate::infrastructure::feeds::yahoo::YahooChartProvider;
use crate::infrastructure::http::{self, APP_USER_AGENT};
use crate::infrastructure::llm::openai::OpenAiChat;
use crate::infrastructure::publishers;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

pub struct MarketBrief {
    pipeline: Pipeline,
}

impl MarketBrief {
    /// Wires the production adapters for `target` from `config`.
    pub fn new(config: &AppConfig, target: TargetKind) -> Result<Self, DomainError> {
        let client = http::client(APP_USER_AGENT, &config.http)?;
        let quotes: Arc<dyn QuoteProvider> = Arc::new(YahooChartProvider::new(client.clone()));
        let feeds: Arc<dyn FeedReader> = Arc::new(HttpFeedReader::new(client.clone()));
        let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiChat::new(
            config.openai.api_key.as_ref().map(|k| k.expose().to_string()),
            config.openai.model.clone(),
            config.openai.base_url.clone(),
            client.clone(),
        ));
        let publisher = publishers::for_target(
            config.publish_target(target),
            config.notion.base_url.clone(),
            client,
        );

        info!(
            destination = %target,
            timeout_secs = config.http.timeout.as_secs(),
            llm_key = config.openai.api_key.is_some(),
            "marketbrief configured"
        );

        Ok(Self::with_providers(
            config.pipeline.clone(),
            quotes,
            feeds,
            generator,
            publisher,
        ))
    }

    pub fn with_providers(
        settings: PipelineSettings,
        quotes: Arc<dyn QuoteProvider>,
        feeds: Arc<dyn FeedReader>,
        generator: Arc<dyn TextGenerator>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            pipeline: Pipeline::new(settings, quotes, feeds, generator, publisher),
        }
    }

    pub async fn collect(&self, options: &RunOptions) -> Staged<CollectedDocument> {
        self.pipeline.collect(options).await
    }

    pub async fn run_digest(
        &self,
        today: NaiveDate,
        options: &RunOptions,
    ) -> Result<RunReport, DomainError> {
        self.pipeline.run_digest(today, options).await
    }

    pub async fn run_news(
        &self,
        limit: Option<usize>,
        dry_run: bool,
    ) -> Result<NewsReport, DomainError> {
        self.pipeline.run_news(limit, dry_run).await
    }
}
