use crate::domain::entities::feed_entry::FeedEntry;
use crate::domain::error::SourceError;
use async_trait::async_trait;

/// Fetches and parses a syndication feed into entries, in feed order.
#[async_trait]
pub trait FeedReader: Send + Sync {
    async fn read(&self, url: &str) -> Result<Vec<FeedEntry>, SourceError>;
}
