//! Fetch → summarize → publish orchestration.
//!
//! Collect and summarize failures are folded into the data (inline
//! annotations, placeholder summary) and recorded as degraded stages in the
//! report. A publish failure is the only error returned to the caller.

use crate::application::collect_headlines::CollectHeadlinesUseCase;
use crate::application::collect_quotes::CollectQuotesUseCase;
use crate::application::compose::{digest_title, with_link, DEFAULT_TITLE_LABEL};
use crate::application::publish::PublishUseCase;
use crate::application::summarize::SummarizeUseCase;
use crate::domain::entities::collected_document::{CollectedDocument, Section};
use crate::domain::entities::quote::Instrument;
use crate::domain::entities::summary::Summary;
use crate::domain::error::DomainError;
use crate::domain::ports::feed_reader::FeedReader;
use crate::domain::ports::publisher::{PublishOutcome, Publisher};
use crate::domain::ports::quote_provider::QuoteProvider;
use crate::domain::ports::text_generator::TextGenerator;
use crate::domain::values::lookback::Lookback;
use crate::domain::values::prompt::PromptTemplate;
use crate::domain::values::stage::{Stage, StageOutcome, StageReport, Staged};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument as _};
use uuid::Uuid;

pub const DEFAULT_FEED_URL: &str = "https://news.yahoo.co.jp/rss/topics/business.xml";
pub const DEFAULT_HEADLINE_LIMIT: usize = 5;

/// Everything the pipeline needs besides its four adapters.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub instruments: Vec<Instrument>,
    pub lookback_windows: Vec<Lookback>,
    pub feed_url: String,
    pub headline_limit: usize,
    pub digest_prompt: PromptTemplate,
    pub article_prompt: PromptTemplate,
    pub title_label: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            instruments: Instrument::default_set(),
            lookback_windows: Lookback::default_windows(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            headline_limit: DEFAULT_HEADLINE_LIMIT,
            digest_prompt: PromptTemplate::digest(),
            article_prompt: PromptTemplate::article(),
            title_label: DEFAULT_TITLE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub include_quotes: bool,
    pub include_headlines: bool,
    /// Stop after summarizing; nothing is sent to the destination.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            include_quotes: true,
            include_headlines: true,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub title: String,
    pub document: String,
    pub summary: Summary,
    pub stages: Vec<StageReport>,
    /// `None` on a dry run.
    pub publish: Option<PublishOutcome>,
}

impl RunReport {
    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.outcome)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub title: String,
    pub link: String,
    pub summary: Summary,
    pub summary_outcome: StageOutcome,
    pub publish: Option<PublishOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsReport {
    pub run_id: Uuid,
    pub collect: StageOutcome,
    pub entries: Vec<EntryReport>,
}

pub struct Pipeline {
    quotes: CollectQuotesUseCase,
    headlines: CollectHeadlinesUseCase,
    summarize: SummarizeUseCase,
    publish: PublishUseCase,
    digest_prompt: PromptTemplate,
    article_prompt: PromptTemplate,
    title_label: String,
}

impl Pipeline {
    pub fn new(
        settings: PipelineSettings,
        quote_provider: Arc<dyn QuoteProvider>,
        feed_reader: Arc<dyn FeedReader>,
        generator: Arc<dyn TextGenerator>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            quotes: CollectQuotesUseCase::new(
                quote_provider,
                settings.instruments,
                settings.lookback_windows,
            ),
            headlines: CollectHeadlinesUseCase::new(
                feed_reader,
                settings.feed_url,
                settings.headline_limit,
            ),
            summarize: SummarizeUseCase::new(generator),
            publish: PublishUseCase::new(publisher),
            digest_prompt: settings.digest_prompt,
            article_prompt: settings.article_prompt,
            title_label: settings.title_label,
        }
    }

    /// COLLECT stage. Never fails; unavailable sources show up as inline
    /// annotations and a degraded outcome.
    pub async fn collect(&self, options: &RunOptions) -> Staged<CollectedDocument> {
        info!(stage = %Stage::Collect, "collecting sources");
        let mut document = CollectedDocument::new();
        let mut problems = Vec::new();

        if options.include_quotes {
            let quotes = self.quotes.execute().await;
            let missing = quotes.iter().filter(|q| !q.is_available()).count();
            if missing > 0 {
                problems.push(format!("{missing} of {} quotes unavailable", quotes.len()));
            }
            document.push(Section::quotes(&quotes));
        }

        if options.include_headlines {
            let batch = self.headlines.execute().await;
            if let Some(reason) = &batch.diagnostic {
                problems.push(format!("headlines: {reason}"));
            }
            document.push(Section::headlines(&batch.entries, batch.diagnostic));
        }

        if problems.is_empty() {
            Staged::ok(document)
        } else {
            Staged::degraded(document, problems.join("; "))
        }
    }

    /// One summary of quotes and headlines, published under
    /// `YYYY-MM-DD <label>`.
    pub async fn run_digest(
        &self,
        today: NaiveDate,
        options: &RunOptions,
    ) -> Result<RunReport, DomainError> {
        let run_id = Uuid::new_v4();
        self.digest(run_id, today, options)
            .instrument(info_span!("digest", %run_id))
            .await
    }

    async fn digest(
        &self,
        run_id: Uuid,
        today: NaiveDate,
        options: &RunOptions,
    ) -> Result<RunReport, DomainError> {
        info!(stage = %Stage::Start, "pipeline started");
        let mut stages = Vec::with_capacity(3);

        let (document, outcome) = self.collect(options).await.into_parts();
        stages.push(StageReport {
            stage: Stage::Collect,
            outcome,
        });
        let document = document.render();

        info!(stage = %Stage::Summarize, "summarizing");
        let (summary, outcome) = self
            .summarize
            .execute(&document, &self.digest_prompt)
            .await
            .into_parts();
        stages.push(StageReport {
            stage: Stage::Summarize,
            outcome,
        });

        let title = digest_title(today, &self.title_label);
        let publish = if options.dry_run {
            info!("dry run, not publishing");
            None
        } else {
            info!(stage = %Stage::Publish, destination = self.publish.destination(), "publishing");
            let outcome = self.publish.execute(&title, summary.as_str()).await?;
            stages.push(StageReport {
                stage: Stage::Publish,
                outcome: publish_stage_outcome(&outcome),
            });
            Some(outcome)
        };

        info!(stage = %Stage::Done, "pipeline finished");
        Ok(RunReport {
            run_id,
            title,
            document,
            summary,
            stages,
            publish,
        })
    }

    /// One summary and one message per feed entry, each message carrying the
    /// entry link. Stops at the first publish failure.
    pub async fn run_news(
        &self,
        limit: Option<usize>,
        dry_run: bool,
    ) -> Result<NewsReport, DomainError> {
        let run_id = Uuid::new_v4();
        self.news(run_id, limit, dry_run)
            .instrument(info_span!("news", %run_id))
            .await
    }

    async fn news(
        &self,
        run_id: Uuid,
        limit: Option<usize>,
        dry_run: bool,
    ) -> Result<NewsReport, DomainError> {
        info!(stage = %Stage::Collect, "collecting headlines");
        let batch = self
            .headlines
            .execute_with_limit(limit.unwrap_or(self.headlines.limit()))
            .await;
        let collect = match &batch.diagnostic {
            Some(reason) => StageOutcome::Degraded {
                reason: reason.clone(),
            },
            None => StageOutcome::Ok,
        };

        if batch.entries.is_empty() {
            warn!("no feed entries, nothing to publish");
        }

        let mut entries = Vec::with_capacity(batch.entries.len());
        for entry in batch.entries {
            info!(stage = %Stage::Summarize, title = %entry.title, "summarizing entry");
            let (summary, summary_outcome) = self
                .summarize
                .execute(&entry.as_document_text(), &self.article_prompt)
                .await
                .into_parts();

            let publish = if dry_run {
                None
            } else {
                let body = with_link(summary.as_str(), &entry.link, self.publish.content_limit());
                Some(self.publish.execute(&entry.title, &body).await?)
            };

            entries.push(EntryReport {
                title: entry.title,
                link: entry.link,
                summary,
                summary_outcome,
                publish,
            });
        }

        info!(stage = %Stage::Done, entries = entries.len(), "news run finished");
        Ok(NewsReport {
            run_id,
            collect,
            entries,
        })
    }
}

fn publish_stage_outcome(outcome: &PublishOutcome) -> StageOutcome {
    match outcome {
        PublishOutcome::Published { .. } => StageOutcome::Ok,
        PublishOutcome::Skipped { reason } => StageOutcome::Degraded {
            reason: reason.clone(),
        },
    }
}
