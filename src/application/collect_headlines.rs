use crate::domain::entities::feed_entry::FeedEntry;
use crate::domain::ports::feed_reader::FeedReader;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Entries kept from one feed read, plus a diagnostic when nothing usable
/// came back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadlineBatch {
    pub entries: Vec<FeedEntry>,
    pub diagnostic: Option<String>,
}

pub struct CollectHeadlinesUseCase {
    reader: Arc<dyn FeedReader>,
    url: String,
    limit: usize,
}

impl CollectHeadlinesUseCase {
    pub fn new(reader: Arc<dyn FeedReader>, url: String, limit: usize) -> Self {
        Self { reader, url, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Reads the feed and keeps the first `limit` entries in feed order.
    pub async fn execute(&self) -> HeadlineBatch {
        self.execute_with_limit(self.limit).await
    }

    pub async fn execute_with_limit(&self, limit: usize) -> HeadlineBatch {
        if limit == 0 {
            return HeadlineBatch::default();
        }

        match self.reader.read(&self.url).await {
            Ok(entries) if entries.is_empty() => {
                warn!(url = %self.url, "feed returned no entries");
                HeadlineBatch {
                    entries: Vec::new(),
                    diagnostic: Some("ニュースフィードに記事がありませんでした".to_string()),
                }
            }
            Ok(entries) => {
                let entries: Vec<FeedEntry> = entries.into_iter().take(limit).collect();
                info!(url = %self.url, kept = entries.len(), "headlines collected");
                HeadlineBatch {
                    entries,
                    diagnostic: None,
                }
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "feed read failed");
                HeadlineBatch {
                    entries: Vec::new(),
                    diagnostic: Some(format!("ニュースフィードの取得に失敗しました ({e})")),
                }
            }
        }
    }
}
